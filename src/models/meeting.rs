//! Meeting models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a meeting is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingType {
    /// Everyone in the same room
    InPerson,
    /// Video call only
    Zoom,
    /// In person with a video call running alongside
    Hybrid,
}

impl MeetingType {
    /// Database representation (matches the serde wire form)
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::InPerson => "IN_PERSON",
            MeetingType::Zoom => "ZOOM",
            MeetingType::Hybrid => "HYBRID",
        }
    }

    /// Parse the database representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "IN_PERSON" => Some(MeetingType::InPerson),
            "ZOOM" => Some(MeetingType::Zoom),
            "HYBRID" => Some(MeetingType::Hybrid),
            _ => None,
        }
    }
}

/// A scheduled or past ward meeting
///
/// `date` and `time` are kept as the strings the dashboard forms submit
/// (`YYYY-MM-DD` and `HH:MM`); they are validated at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier
    pub id: Uuid,

    /// Meeting title
    pub title: String,

    /// Meeting date (`YYYY-MM-DD`)
    pub date: String,

    /// Meeting time (`HH:MM`)
    pub time: String,

    /// How the meeting is held
    pub meeting_type: MeetingType,

    /// Recording URL, if one exists
    pub recording_url: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Whether any transcription references this meeting
    pub has_transcription: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    /// Create a new meeting record
    pub fn new(
        title: String,
        date: String,
        time: String,
        meeting_type: MeetingType,
        recording_url: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            date,
            time,
            meeting_type,
            recording_url,
            notes,
            has_transcription: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_type_roundtrip() {
        for mt in [MeetingType::InPerson, MeetingType::Zoom, MeetingType::Hybrid] {
            assert_eq!(MeetingType::from_str(mt.as_str()), Some(mt));
        }
        assert_eq!(MeetingType::from_str("VIRTUAL"), None);
    }

    #[test]
    fn test_meeting_type_serde_form_matches_db_form() {
        let json = serde_json::to_string(&MeetingType::InPerson).unwrap();
        assert_eq!(json, "\"IN_PERSON\"");
        let parsed: MeetingType = serde_json::from_str("\"HYBRID\"").unwrap();
        assert_eq!(parsed, MeetingType::Hybrid);
    }
}
