//! Event types and event bus for wardboard
//!
//! Dashboard pages subscribe over SSE (`GET /api/events`) and receive these
//! events as they happen, so a page showing the transcription list updates
//! without polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::TranscriptionStatus;

/// Ward dashboard event types
///
/// Events are broadcast via [`EventBus`] and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WardEvent {
    /// Transcription moved between statuses (PROCESSING → COMPLETED/FAILED)
    ///
    /// Triggers:
    /// - SSE: Update status badge on the transcriptions page
    TranscriptionStatusChanged {
        /// Transcription UUID
        transcription_id: Uuid,
        /// Status before the change
        old_status: TranscriptionStatus,
        /// Status after the change
        new_status: TranscriptionStatus,
        /// When the status changed
        timestamp: DateTime<Utc>,
    },

    /// Finalized attendance sheet was persisted
    ///
    /// Triggers:
    /// - SSE: Refresh the saved-sheets listing
    AttendanceSheetSaved {
        /// Sheet UUID
        sheet_id: Uuid,
        /// Number of entries on the sheet
        entries: usize,
        /// When the sheet was saved
        timestamp: DateTime<Utc>,
    },
}

impl WardEvent {
    /// Get event type as string, used as the SSE `event:` field
    pub fn event_type(&self) -> &str {
        match self {
            WardEvent::TranscriptionStatusChanged { .. } => "TranscriptionStatusChanged",
            WardEvent::AttendanceSheetSaved { .. } => "AttendanceSheetSaved",
        }
    }
}

/// Central event distribution bus for application-wide events
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<WardEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    ///
    /// `capacity` is the number of events buffered before old events are
    /// dropped for lagging subscribers.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<WardEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether any subscriber is listening
    ///
    /// Dashboard events are notifications, not commands; nothing breaks when
    /// no SSE client is connected.
    pub fn emit_lossy(&self, event: WardEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
