//! Unified error handling for route handlers.
//!
//! Every failure a request can hit is a client-facing status: unreadable
//! files are reported as missing, never as server errors. Route handlers
//! return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// No file to serve (not even the fallback document).
    #[error("Not found")]
    NotFound,

    /// The request path resolved outside the public root.
    #[error("Forbidden")]
    Forbidden,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::NotFound.to_string(), "Not found");
        assert_eq!(AppError::Forbidden.to_string(), "Forbidden");

        let err = AppError::BadRequest("invalid path encoding".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid path encoding");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(get_status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_is_plain_text() {
        let response = AppError::NotFound.into_response();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "text/plain; charset=utf-8");
    }
}
