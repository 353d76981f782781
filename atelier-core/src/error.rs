use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Failure taxonomy for gallery operations.
///
/// `Validation`, `Unauthorized`, `Forbidden`, and `NotFound` are
/// user-correctable and surfaced as such by the HTTP layer; the remaining
/// variants are internal faults not attributable to caller input.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
