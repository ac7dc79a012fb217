//! Server-Sent Events endpoint
//!
//! Streams ward events (transcription status changes, attendance saves) to
//! the dashboard. Each subscriber gets its own broadcast receiver; slow
//! clients drop old events rather than stalling the bus.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// GET /api/events
///
/// The SSE `event:` name carries the event type; the `data:` payload is the
/// JSON-serialized event. Comment-only heartbeats keep idle connections open
/// through proxies.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_bus.subscribe();
    debug!(
        subscribers = state.event_bus.subscriber_count(),
        "SSE client connected"
    );

    let stream = async_stream::stream! {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(HEARTBEAT_INTERVAL) => {
                    yield Ok(Event::default().comment("heartbeat"));
                }
                event = rx.recv() => {
                    match event {
                        Ok(event) => match serde_json::to_string(&event) {
                            Ok(json) => {
                                yield Ok(Event::default()
                                    .event(event.event_type())
                                    .data(json));
                            }
                            Err(e) => {
                                warn!(error = %e, "Failed to serialize event for SSE");
                            }
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "SSE subscriber lagged, events dropped");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
