//! Transcription models
//!
//! A transcription is created in PROCESSING when a recording is uploaded and
//! moves to COMPLETED or FAILED when the transcription job finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transcription job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TranscriptionStatus {
    /// Upload accepted, transcription running
    Processing,
    /// Transcript and summary available
    Completed,
    /// Transcription job failed
    Failed,
}

impl TranscriptionStatus {
    /// Database representation (matches the serde wire form)
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionStatus::Processing => "PROCESSING",
            TranscriptionStatus::Completed => "COMPLETED",
            TranscriptionStatus::Failed => "FAILED",
        }
    }

    /// Parse the database representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PROCESSING" => Some(TranscriptionStatus::Processing),
            "COMPLETED" => Some(TranscriptionStatus::Completed),
            "FAILED" => Some(TranscriptionStatus::Failed),
            _ => None,
        }
    }
}

/// A transcription row as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Unique transcription identifier
    pub id: Uuid,

    /// Meeting this transcription belongs to, if linked
    pub meeting_id: Option<Uuid>,

    /// Transcript text (empty until the job completes)
    pub content: String,

    /// Generated summary, once available
    pub summary: Option<String>,

    /// Job status
    pub status: TranscriptionStatus,

    /// When the upload was accepted
    pub created_at: DateTime<Utc>,

    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl Transcription {
    /// Create a new transcription in PROCESSING
    pub fn new(meeting_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            meeting_id,
            content: String::new(),
            summary: None,
            status: TranscriptionStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Listing entry: everything except the transcript body
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionSummary {
    /// Transcription identifier
    pub id: Uuid,

    /// Linked meeting, if any
    pub meeting_id: Option<Uuid>,

    /// Title of the linked meeting, if any
    pub meeting_title: Option<String>,

    /// Generated summary, once available
    pub summary: Option<String>,

    /// Job status
    pub status: TranscriptionStatus,

    /// When the upload was accepted
    pub created_at: DateTime<Utc>,

    /// Last status change
    pub updated_at: DateTime<Utc>,
}

/// Detail view: the full row plus the linked meeting title
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionDetail {
    /// Transcription identifier
    pub id: Uuid,

    /// Linked meeting, if any
    pub meeting_id: Option<Uuid>,

    /// Title of the linked meeting, if any
    pub meeting_title: Option<String>,

    /// Transcript text
    pub content: String,

    /// Generated summary, once available
    pub summary: Option<String>,

    /// Job status
    pub status: TranscriptionStatus,

    /// When the upload was accepted
    pub created_at: DateTime<Utc>,

    /// Last status change
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            TranscriptionStatus::Processing,
            TranscriptionStatus::Completed,
            TranscriptionStatus::Failed,
        ] {
            assert_eq!(TranscriptionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(TranscriptionStatus::from_str("DONE"), None);
    }

    #[test]
    fn test_new_transcription_starts_processing() {
        let t = Transcription::new(None);
        assert_eq!(t.status, TranscriptionStatus::Processing);
        assert!(t.content.is_empty());
        assert!(t.summary.is_none());
        assert_eq!(t.created_at, t.updated_at);
    }
}
