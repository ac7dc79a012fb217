//! Transcription endpoints
//!
//! `POST /api/transcription/upload` accepts a meeting recording, creates a
//! PROCESSING row, and spawns the transcription job; the response returns
//! before the job finishes. Clients follow progress via SSE or by polling
//! `GET /api/transcriptions/:id`.

use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::multipart_error;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Transcription, TranscriptionDetail, TranscriptionSummary};
use crate::services::transcriber::run_mock_transcription;
use crate::AppState;

/// Content types accepted for meeting recordings
const VALID_CONTENT_TYPES: [&str; 5] = [
    "audio/mpeg",
    "audio/wav",
    "audio/mp4",
    "video/mp4",
    "audio/m4a",
];

/// Rejection message for unsupported uploads
const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload an audio or video file.";

/// POST /api/transcription/upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub transcription_id: Uuid,
}

/// GET /api/transcriptions response
#[derive(Debug, Serialize)]
pub struct TranscriptionsResponse {
    pub transcriptions: Vec<TranscriptionSummary>,
}

/// POST /api/transcription/upload
///
/// Multipart upload with the recording in a `file` field and an optional
/// `meeting_id` text field linking it to a meeting.
pub async fn upload_recording(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file: Option<(axum::body::Bytes, Option<String>, String)> = None;
    let mut meeting_id_field: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let content_type = field.content_type().map(|s| s.to_string());
                let file_name = sanitize_file_name(field.file_name());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((bytes, content_type, file_name));
            }
            "meeting_id" => {
                meeting_id_field = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let Some((bytes, content_type, file_name)) = file else {
        return Err(ApiError::MissingUpload);
    };

    // Trust a declared content type; sniff magic bytes when there is none
    let supported = match content_type.as_deref() {
        Some(declared) => is_supported_mime(declared),
        None => infer::get(&bytes)
            .map(|kind| is_supported_mime(kind.mime_type()))
            .unwrap_or(false),
    };
    if !supported {
        return Err(ApiError::BadRequest(INVALID_TYPE_MESSAGE.to_string()));
    }

    // A linked meeting must exist before we accept the upload
    let meeting_id = match meeting_id_field.filter(|s| !s.trim().is_empty()) {
        Some(raw) => {
            let id = Uuid::parse_str(raw.trim())
                .map_err(|_| ApiError::BadRequest(format!("Invalid meeting id: {}", raw)))?;
            if !db::meetings::meeting_exists(&state.db, id).await? {
                return Err(ApiError::BadRequest("Meeting not found".to_string()));
            }
            Some(id)
        }
        None => None,
    };

    let staged = state
        .config
        .staging_dir
        .join(format!("transcription-{}-{}", Uuid::new_v4(), file_name));

    let transcription = Transcription::new(meeting_id);

    if let Err(e) = stage_and_insert(&state, &staged, &bytes, &transcription).await {
        error!(error = %e, "Recording upload failed");
        state
            .record_error(format!("Transcription upload: {}", e))
            .await;
        let _ = tokio::fs::remove_file(&staged).await;
        return Err(ApiError::Processing("Failed to upload file".to_string()));
    }

    info!(
        transcription_id = %transcription.id,
        file = %file_name,
        size_bytes = bytes.len(),
        "Recording accepted, transcription started"
    );

    tokio::spawn(run_mock_transcription(
        state.db.clone(),
        state.event_bus.clone(),
        transcription.id,
        staged,
    ));

    Ok(Json(UploadResponse {
        message: "File uploaded successfully. Transcription in progress.".to_string(),
        transcription_id: transcription.id,
    }))
}

/// Write the staged file and create the PROCESSING row
async fn stage_and_insert(
    state: &AppState,
    staged: &std::path::Path,
    bytes: &[u8],
    transcription: &Transcription,
) -> crate::error::Result<()> {
    tokio::fs::write(staged, bytes).await?;
    db::transcriptions::insert_transcription(&state.db, transcription).await?;
    Ok(())
}

/// GET /api/transcriptions
pub async fn list_transcriptions(
    State(state): State<AppState>,
) -> ApiResult<Json<TranscriptionsResponse>> {
    let transcriptions = db::transcriptions::list_transcriptions(&state.db).await?;
    Ok(Json(TranscriptionsResponse { transcriptions }))
}

/// GET /api/transcriptions/:id
pub async fn get_transcription(
    State(state): State<AppState>,
    Path(transcription_id): Path<Uuid>,
) -> ApiResult<Json<TranscriptionDetail>> {
    match db::transcriptions::get_transcription(&state.db, transcription_id).await? {
        Some(detail) => Ok(Json(detail)),
        None => Err(ApiError::NotFound("Transcription not found".to_string())),
    }
}

/// Whether a content type is an accepted recording format
///
/// The magic-byte sniffer reports the `x-` forms for wav and m4a.
fn is_supported_mime(mime: &str) -> bool {
    VALID_CONTENT_TYPES.contains(&mime) || mime == "audio/x-wav" || mime == "audio/x-m4a"
}

/// Strip any path components a client put in the filename
fn sanitize_file_name(raw: Option<&str>) -> String {
    raw.and_then(|name| std::path::Path::new(name).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Build transcription routes
pub fn transcription_routes() -> Router<AppState> {
    Router::new()
        .route("/api/transcription/upload", post(upload_recording))
        .route("/api/transcriptions", get(list_transcriptions))
        .route("/api/transcriptions/:id", get(get_transcription))
}
