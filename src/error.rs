//! Error types for wardboard
//!
//! Two layers: [`Error`] for services and storage, [`ApiError`] for HTTP
//! handlers. Every API failure body is a flat `{"error": "<message>"}` object,
//! which is the shape the dashboard front-end already consumes. Internal
//! detail (database, IO) is logged server-side and never echoed to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for service and storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for services and storage
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text recognition failure
    #[error("OCR error: {0}")]
    Ocr(#[from] crate::services::ocr::OcrError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violation (bad row data, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload form did not carry the expected file field (400)
    ///
    /// The message is a fixed string the front-end matches on.
    #[error("No file uploaded")]
    MissingUpload,

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Processing failure with a client-safe message (500)
    ///
    /// The message is returned verbatim; the underlying cause must already
    /// have been logged by the handler.
    #[error("Processing failed: {0}")]
    Processing(String),

    /// Internal error (500); the client sees a generic message
    #[error("Internal error: {0}")]
    Internal(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingUpload => {
                (StatusCode::BAD_REQUEST, "No file uploaded".to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Processing(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(ref err) => {
                tracing::error!(error = %err, "Internal error in request handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(Error::Database(err))
    }
}
