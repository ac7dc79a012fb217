//! Attendance sheet models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One roster row extracted from an attendance sheet
///
/// `id` is positional (`member-{index}`) and assigned during parsing; it is
/// stable for the lifetime of one extraction, not across sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Positional identifier within the extraction (`member-0`, `member-1`, ...)
    pub id: String,

    /// Member name, at most two words
    pub name: String,

    /// Whether a presence marker was found on the row
    pub present: bool,
}

/// Summary of a saved attendance sheet, for listings
#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    /// Sheet identifier
    pub sheet_id: Uuid,

    /// Date the sheet records attendance for
    pub sheet_date: DateTime<Utc>,

    /// Total entries on the sheet
    pub entry_count: i64,

    /// Entries marked present
    pub present_count: i64,

    /// When the sheet was saved
    pub created_at: DateTime<Utc>,
}
