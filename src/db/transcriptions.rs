//! Transcription persistence

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{parse_datetime, parse_uuid};
use crate::error::{Error, Result};
use crate::models::{
    Transcription, TranscriptionDetail, TranscriptionStatus, TranscriptionSummary,
};

/// Insert a freshly accepted transcription (status PROCESSING)
pub async fn insert_transcription(pool: &SqlitePool, transcription: &Transcription) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO transcriptions (
            transcription_id, meeting_id, content, summary, status, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(transcription.id.to_string())
    .bind(transcription.meeting_id.map(|id| id.to_string()))
    .bind(&transcription.content)
    .bind(&transcription.summary)
    .bind(transcription.status.as_str())
    .bind(transcription.created_at.to_rfc3339())
    .bind(transcription.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Store the finished transcript and mark the row COMPLETED
pub async fn set_completed(
    pool: &SqlitePool,
    transcription_id: Uuid,
    content: &str,
    summary: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE transcriptions
        SET content = ?, summary = ?, status = ?, updated_at = ?
        WHERE transcription_id = ?
        "#,
    )
    .bind(content)
    .bind(summary)
    .bind(TranscriptionStatus::Completed.as_str())
    .bind(chrono::Utc::now().to_rfc3339())
    .bind(transcription_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark the row FAILED
pub async fn set_failed(pool: &SqlitePool, transcription_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE transcriptions
        SET status = ?, updated_at = ?
        WHERE transcription_id = ?
        "#,
    )
    .bind(TranscriptionStatus::Failed.as_str())
    .bind(chrono::Utc::now().to_rfc3339())
    .bind(transcription_id.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

/// List transcriptions (transcript bodies elided), newest first
pub async fn list_transcriptions(pool: &SqlitePool) -> Result<Vec<TranscriptionSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT t.transcription_id, t.meeting_id, t.summary, t.status,
               t.created_at, t.updated_at,
               m.title AS meeting_title
        FROM transcriptions t
        LEFT JOIN meetings m ON m.meeting_id = t.meeting_id
        ORDER BY t.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut transcriptions = Vec::with_capacity(rows.len());
    for row in rows {
        let transcription_id: String = row.get("transcription_id");
        let meeting_id: Option<String> = row.get("meeting_id");
        let status: String = row.get("status");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");

        transcriptions.push(TranscriptionSummary {
            id: parse_uuid(&transcription_id, "transcription_id")?,
            meeting_id: meeting_id
                .map(|id| parse_uuid(&id, "meeting_id"))
                .transpose()?,
            meeting_title: row.get("meeting_title"),
            summary: row.get("summary"),
            status: TranscriptionStatus::from_str(&status)
                .ok_or_else(|| Error::Internal(format!("Unknown status: {}", status)))?,
            created_at: parse_datetime(&created_at, "created_at")?,
            updated_at: parse_datetime(&updated_at, "updated_at")?,
        });
    }

    Ok(transcriptions)
}

/// Fetch one transcription with its transcript body
pub async fn get_transcription(
    pool: &SqlitePool,
    transcription_id: Uuid,
) -> Result<Option<TranscriptionDetail>> {
    let row = sqlx::query(
        r#"
        SELECT t.transcription_id, t.meeting_id, t.content, t.summary, t.status,
               t.created_at, t.updated_at,
               m.title AS meeting_title
        FROM transcriptions t
        LEFT JOIN meetings m ON m.meeting_id = t.meeting_id
        WHERE t.transcription_id = ?
        "#,
    )
    .bind(transcription_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let meeting_id: Option<String> = row.get("meeting_id");
            let status: String = row.get("status");
            let created_at: String = row.get("created_at");
            let updated_at: String = row.get("updated_at");

            Ok(Some(TranscriptionDetail {
                id: transcription_id,
                meeting_id: meeting_id
                    .map(|id| parse_uuid(&id, "meeting_id"))
                    .transpose()?,
                meeting_title: row.get("meeting_title"),
                content: row.get("content"),
                summary: row.get("summary"),
                status: TranscriptionStatus::from_str(&status)
                    .ok_or_else(|| Error::Internal(format!("Unknown status: {}", status)))?,
                created_at: parse_datetime(&created_at, "created_at")?,
                updated_at: parse_datetime(&updated_at, "updated_at")?,
            }))
        }
        None => Ok(None),
    }
}
