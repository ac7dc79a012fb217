//! HTTP API handlers for wardboard

pub mod attendance;
pub mod health;
pub mod meetings;
pub mod sse;
pub mod transcriptions;

pub use attendance::attendance_routes;
pub use health::health_routes;
pub use meetings::meeting_routes;
pub use sse::event_stream;
pub use transcriptions::transcription_routes;

use crate::error::ApiError;
use axum::extract::multipart::MultipartError;

/// Map a multipart decoding failure onto the flat error contract
pub(crate) fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Malformed multipart request: {}", e))
}
