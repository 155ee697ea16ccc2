//! Error types for console navigation.

use thiserror::Error;
use vaultdesk_api::ApiError;

/// Errors raised by the navigation controller.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No route matches the path.
    #[error("no route for {path}")]
    NoRoute { path: String },

    /// The path could not be decoded.
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// The route has no action to submit to.
    #[error("route {path} does not accept submissions")]
    NoAction { path: String },

    /// Nothing is mounted yet.
    #[error("no screen mounted")]
    NoScreen,

    /// A submission is still in flight on this screen.
    #[error("a submission is already pending")]
    SubmissionPending,

    /// The route's loader failed; the screen was not mounted.
    #[error("failed to load {path}: {source}")]
    Loader { path: String, source: ApiError },

    /// The loader returned data the screen cannot render.
    #[error("loader for {path} returned unexpected data")]
    UnexpectedData { path: String },
}

impl ConsoleError {
    /// Whether this is a loader failure caused by a missing secret.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConsoleError::NoRoute { .. } => true,
            ConsoleError::Loader { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
