//! Core library for the Atelier gallery service.
//!
//! Holds the error taxonomy, the persistence layer (Postgres repositories
//! plus an in-memory store for tests and database-less development), the
//! blob store, and the [`GalleryService`] orchestrating them.

pub mod blob;
pub mod database;
pub mod error;
pub mod gallery;

pub use error::{GalleryError, Result};
pub use gallery::service::GalleryService;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
