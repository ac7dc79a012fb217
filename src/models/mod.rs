//! Data models for wardboard

pub mod attendance;
pub mod meeting;
pub mod transcription;

pub use attendance::{AttendanceRecord, SheetSummary};
pub use meeting::{Meeting, MeetingType};
pub use transcription::{
    Transcription, TranscriptionDetail, TranscriptionStatus, TranscriptionSummary,
};
