//! wardboard library interface
//!
//! Exposes the application state and router so integration tests can drive
//! the full HTTP surface without binding a socket.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult, Error, Result};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::events::EventBus;
use crate::services::{OcrEngine, SheetParser};

/// Largest accepted upload (attendance images and meeting recordings)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Resolved configuration
    pub config: Arc<AppConfig>,
    /// OCR engine for attendance sheet images
    pub ocr: Arc<dyn OcrEngine>,
    /// Attendance sheet text parser
    pub parser: Arc<SheetParser>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        event_bus: EventBus,
        config: Arc<AppConfig>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        Self {
            db,
            event_bus,
            config,
            ocr,
            parser: Arc::new(SheetParser::default()),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Record the most recent failure for the health endpoint
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::attendance_routes())
        .merge(api::meeting_routes())
        .merge(api::transcription_routes())
        .route("/api/events", get(api::event_stream))
        .merge(api::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
