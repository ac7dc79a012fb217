//! Attendance sheet persistence

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{parse_datetime, parse_uuid};
use crate::error::Result;
use crate::models::{AttendanceRecord, SheetSummary};

/// Save a finalized sheet and its entries in one transaction
///
/// `source_id` keeps the positional id each record carried during review
/// (`member-3` or a demo ordinal); entries get their own uuids.
pub async fn save_sheet(
    pool: &SqlitePool,
    sheet_id: Uuid,
    sheet_date: DateTime<Utc>,
    records: &[AttendanceRecord],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO attendance_sheets (sheet_id, sheet_date, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(sheet_id.to_string())
    .bind(sheet_date.to_rfc3339())
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *tx)
    .await?;

    for record in records {
        sqlx::query(
            r#"
            INSERT INTO attendance_entries (entry_id, sheet_id, source_id, name, present)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sheet_id.to_string())
        .bind(&record.id)
        .bind(&record.name)
        .bind(i64::from(record.present))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// List saved sheets with entry and presence counts, newest first
pub async fn list_sheets(pool: &SqlitePool) -> Result<Vec<SheetSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT s.sheet_id, s.sheet_date, s.created_at,
               COUNT(e.entry_id) AS entry_count,
               COALESCE(SUM(e.present), 0) AS present_count
        FROM attendance_sheets s
        LEFT JOIN attendance_entries e ON e.sheet_id = s.sheet_id
        GROUP BY s.sheet_id, s.sheet_date, s.created_at
        ORDER BY s.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut sheets = Vec::with_capacity(rows.len());
    for row in rows {
        let sheet_id: String = row.get("sheet_id");
        let sheet_date: String = row.get("sheet_date");
        let created_at: String = row.get("created_at");

        sheets.push(SheetSummary {
            sheet_id: parse_uuid(&sheet_id, "sheet_id")?,
            sheet_date: parse_datetime(&sheet_date, "sheet_date")?,
            entry_count: row.get("entry_count"),
            present_count: row.get("present_count"),
            created_at: parse_datetime(&created_at, "created_at")?,
        });
    }

    Ok(sheets)
}
