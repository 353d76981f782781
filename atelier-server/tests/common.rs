#![allow(dead_code)]

use std::sync::Arc;

use atelier_core::{GalleryService, blob::MemoryBlobStore, database::InMemoryGalleryStore};
use atelier_server::{AppState, auth::jwt, infra::config::Config, routes};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_TOKEN_KEY: &str = "integration-test-key";

/// Router over the in-memory store and blob store, plus handles to both so
/// tests can assert on persisted state directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryGalleryStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

pub fn build_test_app() -> TestApp {
    let config = Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: None,
        upload_dir: std::env::temp_dir(),
        cors_allowed_origins: Vec::new(),
        dev_mode: true,
        auth_token_key: TEST_TOKEN_KEY.to_string(),
    };

    let store = Arc::new(InMemoryGalleryStore::default());
    let blobs = Arc::new(MemoryBlobStore::default());
    let gallery = GalleryService::new(store.clone(), store.clone(), blobs.clone());

    let state = AppState::new(Arc::new(config), Arc::new(gallery));
    let router = routes::create_api_router(state.clone()).with_state(state);

    TestApp {
        router,
        store,
        blobs,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }
}

pub fn member_token(user_id: Uuid) -> String {
    jwt::issue_token(user_id, &["member"], TEST_TOKEN_KEY, Duration::minutes(15))
        .expect("token signing cannot fail")
}

pub fn admin_token(user_id: Uuid) -> String {
    jwt::issue_token(user_id, &["admin"], TEST_TOKEN_KEY, Duration::minutes(15))
        .expect("token signing cannot fail")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Hand-rolled multipart/form-data body for upload requests.
pub struct MultipartBody {
    boundary: &'static str,
    buf: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "atelier-test-boundary",
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str, token: &str) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.buf))
            .unwrap()
    }
}

/// Create an image through the API and return its id.
pub async fn create_image(
    app: &TestApp,
    token: &str,
    title: &str,
    file_name: &str,
    file_len: usize,
) -> Uuid {
    let request = MultipartBody::new()
        .text("title", title)
        .text("description", "generated for tests")
        .file("file", file_name, &vec![0u8; file_len])
        .into_request("/api/v1/images", token);

    let response = app.send(request).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}
