//! Database access for wardboard
//!
//! One SQLite database in the root folder. Uuids and timestamps are stored
//! as TEXT (uuid string / RFC3339) and parsed back at the edges.

pub mod attendance;
pub mod meetings;
pub mod transcriptions;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use uuid::Uuid;

/// Initialize database connection pool
///
/// Creates the database file (and its parent directory) when missing and
/// brings the schema up.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create tables if they don't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_sheets (
            sheet_id TEXT PRIMARY KEY,
            sheet_date TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_entries (
            entry_id TEXT PRIMARY KEY,
            sheet_id TEXT NOT NULL REFERENCES attendance_sheets(sheet_id) ON DELETE CASCADE,
            source_id TEXT NOT NULL,
            name TEXT NOT NULL,
            present INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            meeting_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            meeting_date TEXT NOT NULL,
            meeting_time TEXT NOT NULL,
            meeting_type TEXT NOT NULL,
            recording_url TEXT,
            notes TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transcriptions (
            transcription_id TEXT PRIMARY KEY,
            meeting_id TEXT,
            content TEXT NOT NULL DEFAULT '',
            summary TEXT,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!(
        "Database tables initialized (attendance_sheets, attendance_entries, meetings, transcriptions)"
    );

    Ok(())
}

/// Parse a stored RFC3339 timestamp
pub(crate) fn parse_datetime(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Failed to parse {}: {}", column, e)))
}

/// Parse a stored uuid
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| Error::Internal(format!("Failed to parse {}: {}", column, e)))
}
