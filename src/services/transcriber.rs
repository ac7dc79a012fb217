//! Mock transcription pipeline
//!
//! Stands in for a real speech-to-text integration. An upload creates a
//! PROCESSING row and spawns [`run_mock_transcription`], which fills in a
//! canned transcript and summary and marks the row COMPLETED (or FAILED if
//! the database update fails). The staged upload is removed either way.
//!
//! Swapping in a real engine means replacing [`transcribe`] and nothing else:
//! status transitions, events, and cleanup already behave like the real flow.

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db;
use crate::events::{EventBus, WardEvent};
use crate::models::TranscriptionStatus;

/// Canned transcript used while no speech-to-text engine is wired up
pub const MOCK_TRANSCRIPT: &str = concat!(
    "Meeting opened with prayer by Brother Johnson.\n\n",
    "Sister Smith: Welcome everyone to our ward council meeting. Let's start by reviewing the ministering efforts from last month.\n\n",
    "Brother Williams: We've had good success reaching out to less-active families. The Johnson family attended sacrament meeting last Sunday for the first time in months.\n\n",
    "Sister Davis: The youth activities have been well-attended. We're planning a temple trip next month and need volunteers to help with transportation.\n\n",
    "Brother Martinez: I can help with driving. Also, the Elders Quorum is organizing a service project to help the Anderson family with their yard work.\n\n",
    "Sister Smith: Excellent. Let's make sure we coordinate with the Relief Society on that. Any other items we need to discuss?\n\n",
    "Meeting concluded with assignments distributed and closing prayer by Sister Wilson.",
);

/// Canned summary accompanying the transcript
pub const MOCK_SUMMARY: &str = "Ward council discussed ministering efforts, youth activities including upcoming temple trip, and coordinated service project for the Anderson family. Good progress on reactivation efforts noted.";

/// Simulated engine runtime, so PROCESSING is observable
const PROCESSING_DELAY: Duration = Duration::from_millis(300);

/// Run the transcription job for one uploaded recording
///
/// Intended to be spawned as a detached task after the upload response is
/// sent. Never returns an error: failures are recorded on the row and logged.
pub async fn run_mock_transcription(
    db: SqlitePool,
    event_bus: EventBus,
    transcription_id: Uuid,
    staged_file: PathBuf,
) {
    match transcribe(&db, transcription_id).await {
        Ok(()) => {
            info!(transcription_id = %transcription_id, "Transcription completed");
            event_bus.emit_lossy(WardEvent::TranscriptionStatusChanged {
                transcription_id,
                old_status: TranscriptionStatus::Processing,
                new_status: TranscriptionStatus::Completed,
                timestamp: chrono::Utc::now(),
            });
        }
        Err(e) => {
            error!(
                transcription_id = %transcription_id,
                error = %e,
                "Transcription failed"
            );
            match db::transcriptions::set_failed(&db, transcription_id).await {
                Ok(()) => {
                    event_bus.emit_lossy(WardEvent::TranscriptionStatusChanged {
                        transcription_id,
                        old_status: TranscriptionStatus::Processing,
                        new_status: TranscriptionStatus::Failed,
                        timestamp: chrono::Utc::now(),
                    });
                }
                Err(e) => {
                    error!(
                        transcription_id = %transcription_id,
                        error = %e,
                        "Failed to mark transcription as failed"
                    );
                }
            }
        }
    }

    // The staged upload is only needed while the job runs
    if let Err(e) = tokio::fs::remove_file(&staged_file).await {
        warn!(
            file = %staged_file.display(),
            error = %e,
            "Failed to remove staged upload"
        );
    }
}

/// The transcription work itself; replace this to integrate a real engine
async fn transcribe(db: &SqlitePool, transcription_id: Uuid) -> crate::error::Result<()> {
    tokio::time::sleep(PROCESSING_DELAY).await;
    db::transcriptions::set_completed(db, transcription_id, MOCK_TRANSCRIPT, MOCK_SUMMARY).await
}
