//! Attendance sheet endpoints
//!
//! The review flow is two requests: `POST /api/attendance/process` turns an
//! uploaded sheet photo into editable records (nothing is persisted), then
//! `POST /api/attendance/save` stores the reviewed result.

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::multipart_error;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::events::WardEvent;
use crate::models::{AttendanceRecord, SheetSummary};
use crate::services::demo::{demo_roster, DEMO_MESSAGE};
use crate::services::ocr::RecognizedDocument;
use crate::AppState;

/// POST /api/attendance/process response
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    /// Extracted records, or the demo roster when extraction came up empty
    pub attendance: Vec<AttendanceRecord>,

    /// Present only when the demo roster was substituted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/attendance/save request
#[derive(Debug, Deserialize)]
pub struct SaveSheetRequest {
    /// Date the sheet records attendance for (RFC 3339)
    pub date: String,
    /// Reviewed records
    pub attendance: Vec<AttendanceRecord>,
}

/// POST /api/attendance/save response
#[derive(Debug, Serialize)]
pub struct SaveSheetResponse {
    pub sheet_id: Uuid,
    pub saved: usize,
}

/// GET /api/attendance/sheets response
#[derive(Debug, Serialize)]
pub struct SheetsResponse {
    pub sheets: Vec<SheetSummary>,
}

/// POST /api/attendance/process
///
/// Multipart upload with the photo in an `image` field. The image is staged
/// to disk for the OCR engine and removed again before the response goes out,
/// success or failure.
pub async fn process_sheet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProcessResponse>> {
    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("image") {
            image = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }
    let Some(image) = image else {
        return Err(ApiError::MissingUpload);
    };

    let staged = state
        .config
        .staging_dir
        .join(format!("attendance-{}.png", Uuid::new_v4()));

    let result = recognize_staged(&state, &staged, &image).await;

    // The staged copy is only needed for the engine run
    let _ = tokio::fs::remove_file(&staged).await;

    let document = match result {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, "Attendance sheet processing failed");
            state
                .record_error(format!("Attendance processing: {}", e))
                .await;
            return Err(ApiError::Processing("Failed to process image".to_string()));
        }
    };

    let records = state.parser.parse(&document);

    if records.is_empty() && state.config.demo_fallback {
        info!("No attendance rows extracted; returning demo roster");
        return Ok(Json(ProcessResponse {
            attendance: demo_roster(),
            message: Some(DEMO_MESSAGE.to_string()),
        }));
    }

    info!(records = records.len(), "Attendance sheet processed");
    Ok(Json(ProcessResponse {
        attendance: records,
        message: None,
    }))
}

/// Stage the upload and run text recognition on it
async fn recognize_staged(
    state: &AppState,
    staged: &Path,
    image: &[u8],
) -> crate::error::Result<RecognizedDocument> {
    tokio::fs::write(staged, image).await?;
    let document = state.ocr.recognize(staged).await?;
    Ok(document)
}

/// POST /api/attendance/save
pub async fn save_sheet(
    State(state): State<AppState>,
    Json(request): Json<SaveSheetRequest>,
) -> ApiResult<Json<SaveSheetResponse>> {
    let sheet_date = DateTime::parse_from_rfc3339(&request.date)
        .map_err(|e| ApiError::BadRequest(format!("Invalid date: {}", e)))?
        .with_timezone(&Utc);

    if request.attendance.is_empty() {
        return Err(ApiError::BadRequest(
            "No attendance records to save".to_string(),
        ));
    }

    let sheet_id = Uuid::new_v4();
    db::attendance::save_sheet(&state.db, sheet_id, sheet_date, &request.attendance).await?;

    state.event_bus.emit_lossy(WardEvent::AttendanceSheetSaved {
        sheet_id,
        entries: request.attendance.len(),
        timestamp: Utc::now(),
    });

    info!(
        sheet_id = %sheet_id,
        entries = request.attendance.len(),
        "Attendance sheet saved"
    );

    Ok(Json(SaveSheetResponse {
        sheet_id,
        saved: request.attendance.len(),
    }))
}

/// GET /api/attendance/sheets
pub async fn list_sheets(State(state): State<AppState>) -> ApiResult<Json<SheetsResponse>> {
    let sheets = db::attendance::list_sheets(&state.db).await?;
    Ok(Json(SheetsResponse { sheets }))
}

/// Build attendance routes
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/api/attendance/process", post(process_sheet))
        .route("/api/attendance/save", post(save_sheet))
        .route("/api/attendance/sheets", get(list_sheets))
}
