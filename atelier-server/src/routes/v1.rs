use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{auth_middleware, optional_auth_middleware},
    handlers::{images, likes},
};

use atelier_core::gallery::upload::MAX_UPLOAD_BYTES;

/// Multipart bodies are capped above the upload limit so an oversized file
/// surfaces as a field-level validation error instead of a transport 413.
const MULTIPART_BODY_LIMIT: usize = 2 * MAX_UPLOAD_BYTES;

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(create_public_routes(state.clone()))
        .merge(create_member_routes(state))
}

/// Routes open to anonymous callers. The liked lookup still reads identity
/// when a valid token is offered.
fn create_public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/images", get(images::list_images_handler))
        .route("/images/{id}/liked", get(likes::image_liked_handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ))
}

/// Routes requiring an authenticated caller. Ownership and admin checks
/// live in the service, against the persisted record.
fn create_member_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/images", post(images::create_image_handler))
        .route("/images/new", get(images::new_image_handler))
        .route(
            "/images/{id}",
            get(images::image_details_handler).post(images::update_image_handler),
        )
        .route("/images/{id}/edit", get(images::edit_image_handler))
        .route(
            "/images/{id}/delete",
            get(images::delete_confirm_handler).post(images::delete_image_handler),
        )
        .route("/images/{id}/like", post(likes::toggle_like_handler))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
}
