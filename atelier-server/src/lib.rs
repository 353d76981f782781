//! HTTP surface for the Atelier gallery service.

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
