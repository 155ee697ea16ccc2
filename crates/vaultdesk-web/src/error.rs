//! Error types for the web surface.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::warn;
use vaultdesk_api::ApiError;
use vaultdesk_console::ConsoleError;

use crate::pages;

/// Errors that can occur while serving a console page.
#[derive(Debug, Error)]
pub enum WebError {
    /// Navigation or submission failed.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The query string or form body could not be parsed.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Console(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            WebError::Console(ConsoleError::Loader {
                source: ApiError::InvalidName,
                ..
            }) => StatusCode::BAD_REQUEST,
            WebError::Console(ConsoleError::Loader { .. }) => StatusCode::BAD_GATEWAY,
            WebError::Console(ConsoleError::InvalidPath { .. }) => StatusCode::BAD_REQUEST,
            WebError::Console(ConsoleError::NoAction { .. }) => StatusCode::METHOD_NOT_ALLOWED,
            WebError::Console(ConsoleError::SubmissionPending) => StatusCode::CONFLICT,
            WebError::Console(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// What the page tells the user. Backend details stay in the logs.
    fn message(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "Secret not found.",
            StatusCode::BAD_GATEWAY => "The secret backend could not be reached.",
            StatusCode::BAD_REQUEST => "The request could not be understood.",
            StatusCode::METHOD_NOT_ALLOWED => "This page does not accept that request.",
            _ => "Something went wrong.",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = %status, error = %self, "console request failed");
        }
        (status, Html(pages::render_error(status, self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_error(source: ApiError) -> WebError {
        WebError::Console(ConsoleError::Loader {
            path: "/secrets/db".into(),
            source,
        })
    }

    #[test]
    fn test_loader_not_found_is_404() {
        let err = loader_error(ApiError::NotFound { name: "db".into() });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = loader_error(ApiError::Status {
            status: 404,
            message: "not found".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_loader_failure_is_502() {
        let err = loader_error(ApiError::Status {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unknown_route_is_404() {
        let err = WebError::from(ConsoleError::NoRoute {
            path: "/nope".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unaddressable_name_is_400() {
        assert_eq!(loader_error(ApiError::InvalidName).status(), StatusCode::BAD_REQUEST);
    }
}
