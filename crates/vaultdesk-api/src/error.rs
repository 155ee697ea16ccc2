//! Error types for the secrets API client.

use thiserror::Error;

/// Errors that can occur when talking to the secret backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Secret not found.
    #[error("secret not found: {name}")]
    NotFound { name: String },

    /// Secret already exists.
    #[error("secret already exists: {name}")]
    Conflict { name: String },

    /// Secret names must be non-empty and free of `.`/`..` parts.
    #[error("secret name must not be empty or contain `.` or `..` parts")]
    InvalidName,

    /// The configured base URL is unusable.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// Non-success status from the backend.
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// Whether the backend reported that the secret does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound { .. } => true,
            ApiError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }
}
