//! # Atelier Server
//!
//! Gallery web service for user-submitted AI-generated images.
//!
//! - **Public index**: anyone can browse the gallery
//! - **Member uploads**: authenticated users submit images and like/unlike
//!   them
//! - **Ownership-gated editing**: creators edit their own submissions,
//!   administrators manage everything
//!
//! Built on Axum with PostgreSQL for persistent storage; uploaded image
//! bytes live on the filesystem and are served statically. Identity comes
//! from an external provider as signed tokens.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use atelier_core::{
    GalleryService,
    blob::FsBlobStore,
    database::{InMemoryGalleryStore, PostgresDatabase},
};
use atelier_server::{
    AppState,
    infra::config::{Config, UPLOAD_PUBLIC_PREFIX},
    routes,
};
use axum::http::{HeaderValue, Method, header};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config
        .ensure_directories()
        .context("failed to create upload directory")?;

    let blobs = Arc::new(FsBlobStore::new(&config.upload_dir, UPLOAD_PUBLIC_PREFIX));

    let gallery = match config.database_url.as_deref() {
        Some(url) => {
            let database = PostgresDatabase::new(url).await?;
            database.initialize_schema().await?;
            GalleryService::new(
                Arc::new(database.images()),
                Arc::new(database.likes()),
                blobs,
            )
        }
        None if config.dev_mode => {
            warn!("DATABASE_URL not set; running on the in-memory store (DEV_MODE)");
            let store = Arc::new(InMemoryGalleryStore::default());
            GalleryService::new(store.clone(), store, blobs)
        }
        None => anyhow::bail!(
            "DATABASE_URL must be set (or DEV_MODE=true to run on the in-memory store)"
        ),
    };

    let state = AppState::new(Arc::new(config.clone()), Arc::new(gallery));

    let app = routes::create_api_router(state.clone())
        .nest_service(UPLOAD_PUBLIC_PREFIX, ServeDir::new(&config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid server address")?;
    info!("Starting Atelier gallery server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid CORS origin")?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}
