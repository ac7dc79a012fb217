//! Integration tests for the database layer
//!
//! Tests cover:
//! - Schema creation on a fresh database file
//! - Attendance sheet save transaction and summary counts
//! - Meeting persistence and the has_transcription flag
//! - Transcription status lifecycle (PROCESSING → COMPLETED / FAILED)
//! - Listing order (newest first)

use std::time::Duration;

use chrono::{TimeZone, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use wardboard::db;
use wardboard::models::{AttendanceRecord, Meeting, MeetingType, Transcription, TranscriptionStatus};

/// Test helper: Fresh file-backed database in a temp dir
async fn setup_pool() -> (SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let pool = db::init_database_pool(&dir.path().join("wardboard.db"))
        .await
        .expect("Should open database");
    (pool, dir)
}

fn record(id: &str, name: &str, present: bool) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        name: name.to_string(),
        present,
    }
}

// =============================================================================
// Attendance Sheets
// =============================================================================

#[tokio::test]
async fn test_save_sheet_and_list_counts() {
    let (pool, _dir) = setup_pool().await;

    let sheet_id = Uuid::new_v4();
    let sheet_date = Utc.with_ymd_and_hms(2025, 1, 19, 0, 0, 0).unwrap();
    let records = vec![
        record("member-0", "John Smith", true),
        record("member-1", "Mary Johnson", false),
        record("member-2", "Robert Brown", true),
    ];

    db::attendance::save_sheet(&pool, sheet_id, sheet_date, &records)
        .await
        .expect("Should save sheet");

    let sheets = db::attendance::list_sheets(&pool)
        .await
        .expect("Should list sheets");
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].sheet_id, sheet_id);
    assert_eq!(sheets[0].sheet_date, sheet_date);
    assert_eq!(sheets[0].entry_count, 3);
    assert_eq!(sheets[0].present_count, 2);
}

#[tokio::test]
async fn test_sheet_with_no_one_present() {
    let (pool, _dir) = setup_pool().await;

    let sheet_date = Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap();
    let records = vec![
        record("member-0", "John Smith", false),
        record("member-1", "Mary Johnson", false),
    ];

    db::attendance::save_sheet(&pool, Uuid::new_v4(), sheet_date, &records)
        .await
        .expect("Should save sheet");

    let sheets = db::attendance::list_sheets(&pool).await.unwrap();
    assert_eq!(sheets[0].entry_count, 2);
    assert_eq!(sheets[0].present_count, 0);
}

#[tokio::test]
async fn test_sheets_listed_newest_first() {
    let (pool, _dir) = setup_pool().await;

    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let date = Utc.with_ymd_and_hms(2025, 1, 19, 0, 0, 0).unwrap();
    let records = vec![record("member-0", "John Smith", true)];

    db::attendance::save_sheet(&pool, first, date, &records)
        .await
        .unwrap();
    // Saved timestamps order the listing
    tokio::time::sleep(Duration::from_millis(5)).await;
    db::attendance::save_sheet(&pool, second, date, &records)
        .await
        .unwrap();

    let sheets = db::attendance::list_sheets(&pool).await.unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].sheet_id, second);
    assert_eq!(sheets[1].sheet_id, first);
}

// =============================================================================
// Meetings
// =============================================================================

#[tokio::test]
async fn test_meeting_roundtrip() {
    let (pool, _dir) = setup_pool().await;

    let meeting = Meeting::new(
        "Ward Council".to_string(),
        "2025-01-19".to_string(),
        "19:00".to_string(),
        MeetingType::InPerson,
        Some("https://example.com/recording".to_string()),
        Some("Quarterly planning".to_string()),
    );
    db::meetings::insert_meeting(&pool, &meeting)
        .await
        .expect("Should insert meeting");

    let meetings = db::meetings::list_meetings(&pool)
        .await
        .expect("Should list meetings");
    assert_eq!(meetings.len(), 1);
    assert_eq!(meetings[0].id, meeting.id);
    assert_eq!(meetings[0].title, "Ward Council");
    assert_eq!(meetings[0].date, "2025-01-19");
    assert_eq!(meetings[0].time, "19:00");
    assert_eq!(meetings[0].meeting_type, MeetingType::InPerson);
    assert_eq!(
        meetings[0].recording_url.as_deref(),
        Some("https://example.com/recording")
    );
    assert_eq!(meetings[0].notes.as_deref(), Some("Quarterly planning"));
    assert!(!meetings[0].has_transcription);
}

#[tokio::test]
async fn test_meeting_exists() {
    let (pool, _dir) = setup_pool().await;

    let meeting = Meeting::new(
        "Bishopric".to_string(),
        "2025-01-12".to_string(),
        "07:00".to_string(),
        MeetingType::Zoom,
        None,
        None,
    );
    db::meetings::insert_meeting(&pool, &meeting).await.unwrap();

    assert!(db::meetings::meeting_exists(&pool, meeting.id)
        .await
        .unwrap());
    assert!(!db::meetings::meeting_exists(&pool, Uuid::new_v4())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_meeting_transcription_flag_flips() {
    let (pool, _dir) = setup_pool().await;

    let meeting = Meeting::new(
        "Ward Council".to_string(),
        "2025-01-19".to_string(),
        "19:00".to_string(),
        MeetingType::Hybrid,
        None,
        None,
    );
    db::meetings::insert_meeting(&pool, &meeting).await.unwrap();

    let meetings = db::meetings::list_meetings(&pool).await.unwrap();
    assert!(!meetings[0].has_transcription);

    let transcription = Transcription::new(Some(meeting.id));
    db::transcriptions::insert_transcription(&pool, &transcription)
        .await
        .unwrap();

    let meetings = db::meetings::list_meetings(&pool).await.unwrap();
    assert!(meetings[0].has_transcription);
}

#[tokio::test]
async fn test_meetings_listed_by_date_desc() {
    let (pool, _dir) = setup_pool().await;

    let older = Meeting::new(
        "Bishopric".to_string(),
        "2025-01-12".to_string(),
        "07:00".to_string(),
        MeetingType::InPerson,
        None,
        None,
    );
    let newer = Meeting::new(
        "Ward Council".to_string(),
        "2025-01-19".to_string(),
        "19:00".to_string(),
        MeetingType::InPerson,
        None,
        None,
    );
    db::meetings::insert_meeting(&pool, &older).await.unwrap();
    db::meetings::insert_meeting(&pool, &newer).await.unwrap();

    let meetings = db::meetings::list_meetings(&pool).await.unwrap();
    assert_eq!(meetings[0].id, newer.id);
    assert_eq!(meetings[1].id, older.id);
}

// =============================================================================
// Transcriptions
// =============================================================================

#[tokio::test]
async fn test_transcription_starts_processing() {
    let (pool, _dir) = setup_pool().await;

    let transcription = Transcription::new(None);
    db::transcriptions::insert_transcription(&pool, &transcription)
        .await
        .expect("Should insert transcription");

    let detail = db::transcriptions::get_transcription(&pool, transcription.id)
        .await
        .unwrap()
        .expect("Row should exist");
    assert_eq!(detail.status, TranscriptionStatus::Processing);
    assert_eq!(detail.content, "");
    assert!(detail.summary.is_none());
    assert!(detail.meeting_id.is_none());
    assert!(detail.meeting_title.is_none());
}

#[tokio::test]
async fn test_transcription_completion() {
    let (pool, _dir) = setup_pool().await;

    let transcription = Transcription::new(None);
    db::transcriptions::insert_transcription(&pool, &transcription)
        .await
        .unwrap();

    db::transcriptions::set_completed(&pool, transcription.id, "Full transcript", "Short summary")
        .await
        .expect("Should mark completed");

    let detail = db::transcriptions::get_transcription(&pool, transcription.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.status, TranscriptionStatus::Completed);
    assert_eq!(detail.content, "Full transcript");
    assert_eq!(detail.summary.as_deref(), Some("Short summary"));
    assert!(detail.updated_at >= detail.created_at);
}

#[tokio::test]
async fn test_transcription_failure() {
    let (pool, _dir) = setup_pool().await;

    let transcription = Transcription::new(None);
    db::transcriptions::insert_transcription(&pool, &transcription)
        .await
        .unwrap();

    db::transcriptions::set_failed(&pool, transcription.id)
        .await
        .expect("Should mark failed");

    let detail = db::transcriptions::get_transcription(&pool, transcription.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.status, TranscriptionStatus::Failed);
    assert_eq!(detail.content, "");
}

#[tokio::test]
async fn test_get_transcription_missing() {
    let (pool, _dir) = setup_pool().await;

    let detail = db::transcriptions::get_transcription(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(detail.is_none());
}

#[tokio::test]
async fn test_transcriptions_listing() {
    let (pool, _dir) = setup_pool().await;

    let meeting = Meeting::new(
        "Ward Council".to_string(),
        "2025-01-19".to_string(),
        "19:00".to_string(),
        MeetingType::InPerson,
        None,
        None,
    );
    db::meetings::insert_meeting(&pool, &meeting).await.unwrap();

    let unlinked = Transcription::new(None);
    db::transcriptions::insert_transcription(&pool, &unlinked)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let linked = Transcription::new(Some(meeting.id));
    db::transcriptions::insert_transcription(&pool, &linked)
        .await
        .unwrap();

    let listing = db::transcriptions::list_transcriptions(&pool).await.unwrap();
    assert_eq!(listing.len(), 2);

    // Newest first
    assert_eq!(listing[0].id, linked.id);
    assert_eq!(listing[0].meeting_id, Some(meeting.id));
    assert_eq!(listing[0].meeting_title.as_deref(), Some("Ward Council"));

    assert_eq!(listing[1].id, unlinked.id);
    assert!(listing[1].meeting_id.is_none());
    assert!(listing[1].meeting_title.is_none());
}
