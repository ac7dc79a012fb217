//! Meeting endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Meeting, MeetingType};
use crate::AppState;

/// POST /api/meetings request
#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    /// Meeting title
    pub title: String,

    /// Meeting date (`YYYY-MM-DD`)
    pub date: String,

    /// Meeting time (`HH:MM`)
    pub time: String,

    /// How the meeting is held
    pub meeting_type: MeetingType,

    /// Recording URL, if one exists
    #[serde(default)]
    pub recording_url: Option<String>,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// GET /api/meetings response
#[derive(Debug, Serialize)]
pub struct MeetingsResponse {
    pub meetings: Vec<Meeting>,
}

/// POST /api/meetings
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(request): Json<CreateMeetingRequest>,
) -> ApiResult<Json<Meeting>> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Meeting title is required".to_string()));
    }

    if NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").is_err() {
        return Err(ApiError::BadRequest(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            request.date
        )));
    }

    // HTML time inputs send HH:MM, some clients add seconds
    let time_valid = NaiveTime::parse_from_str(&request.time, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(&request.time, "%H:%M:%S").is_ok();
    if !time_valid {
        return Err(ApiError::BadRequest(format!(
            "Invalid time '{}': expected HH:MM",
            request.time
        )));
    }

    let meeting = Meeting::new(
        title.to_string(),
        request.date,
        request.time,
        request.meeting_type,
        normalize_optional(request.recording_url),
        normalize_optional(request.notes),
    );

    db::meetings::insert_meeting(&state.db, &meeting).await?;

    info!(
        meeting_id = %meeting.id,
        title = %meeting.title,
        "Meeting created"
    );

    Ok(Json(meeting))
}

/// GET /api/meetings
pub async fn list_meetings(State(state): State<AppState>) -> ApiResult<Json<MeetingsResponse>> {
    let meetings = db::meetings::list_meetings(&state.db).await?;
    Ok(Json(MeetingsResponse { meetings }))
}

/// Treat missing and blank optional form fields the same
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Build meeting routes
pub fn meeting_routes() -> Router<AppState> {
    Router::new().route("/api/meetings", get(list_meetings).post(create_meeting))
}
