//! Meeting persistence

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{parse_datetime, parse_uuid};
use crate::error::{Error, Result};
use crate::models::{Meeting, MeetingType};

/// Insert a new meeting
pub async fn insert_meeting(pool: &SqlitePool, meeting: &Meeting) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meetings (
            meeting_id, title, meeting_date, meeting_time, meeting_type,
            recording_url, notes, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(meeting.id.to_string())
    .bind(&meeting.title)
    .bind(&meeting.date)
    .bind(&meeting.time)
    .bind(meeting.meeting_type.as_str())
    .bind(&meeting.recording_url)
    .bind(&meeting.notes)
    .bind(meeting.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether a meeting with this id exists
pub async fn meeting_exists(pool: &SqlitePool, meeting_id: Uuid) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meetings WHERE meeting_id = ?")
        .bind(meeting_id.to_string())
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// List meetings, most recent meeting date first
///
/// `has_transcription` is derived from the transcriptions table on the fly,
/// so it is correct the instant an upload links a meeting.
pub async fn list_meetings(pool: &SqlitePool) -> Result<Vec<Meeting>> {
    let rows = sqlx::query(
        r#"
        SELECT m.meeting_id, m.title, m.meeting_date, m.meeting_time, m.meeting_type,
               m.recording_url, m.notes, m.created_at,
               EXISTS(
                   SELECT 1 FROM transcriptions t WHERE t.meeting_id = m.meeting_id
               ) AS has_transcription
        FROM meetings m
        ORDER BY m.meeting_date DESC, m.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut meetings = Vec::with_capacity(rows.len());
    for row in rows {
        let meeting_id: String = row.get("meeting_id");
        let meeting_type: String = row.get("meeting_type");
        let created_at: String = row.get("created_at");

        meetings.push(Meeting {
            id: parse_uuid(&meeting_id, "meeting_id")?,
            title: row.get("title"),
            date: row.get("meeting_date"),
            time: row.get("meeting_time"),
            meeting_type: MeetingType::from_str(&meeting_type).ok_or_else(|| {
                Error::Internal(format!("Unknown meeting type: {}", meeting_type))
            })?,
            recording_url: row.get("recording_url"),
            notes: row.get("notes"),
            has_transcription: row.get::<i64, _>("has_transcription") != 0,
            created_at: parse_datetime(&created_at, "created_at")?,
        });
    }

    Ok(meetings)
}
