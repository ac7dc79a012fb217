//! Demo roster fallback
//!
//! When extraction yields nothing usable (poor photo, empty page), the
//! dashboard shows a fixed sample roster instead of an empty table so the
//! review flow stays demonstrable. The accompanying message tells the user
//! the data is canned. Disabled via the `demo_fallback` config flag.

use crate::models::AttendanceRecord;

/// Message returned alongside the demo roster
pub const DEMO_MESSAGE: &str =
    "Using demo data - OCR processing will improve with better image quality";

/// The fixed eight-entry roster substituted when no rows could be extracted
///
/// Ids are plain ordinals, disjoint from the `member-{index}` ids of real
/// extractions, so a client can tell the two apart.
pub fn demo_roster() -> Vec<AttendanceRecord> {
    [
        ("1", "John Smith", true),
        ("2", "Mary Johnson", true),
        ("3", "Robert Brown", false),
        ("4", "Patricia Davis", true),
        ("5", "Michael Wilson", true),
        ("6", "Jennifer Garcia", false),
        ("7", "William Martinez", true),
        ("8", "Linda Anderson", true),
    ]
    .into_iter()
    .map(|(id, name, present)| AttendanceRecord {
        id: id.to_string(),
        name: name.to_string(),
        present,
    })
    .collect()
}
