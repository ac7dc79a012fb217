//! wardboard - Ward Management System backend
//!
//! Single-binary HTTP service for a ward clerk dashboard: attendance sheet
//! OCR and record keeping, meeting tracking, recording transcription, and a
//! live event stream for the front-end.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wardboard::config::{AppConfig, Args};
use wardboard::events::EventBus;
use wardboard::services::TesseractOcr;
use wardboard::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration must resolve before tracing so the log level applies
    let config = AppConfig::resolve(&args)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wardboard={},tower_http=info", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting wardboard v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", config.root_folder.display());

    config
        .ensure_directories()
        .context("Failed to initialize root folder")?;

    info!("Database: {}", config.database_path.display());
    let db_pool = wardboard::db::init_database_pool(&config.database_path)
        .await
        .context("Failed to open database")?;
    info!("Database connection established");

    let ocr = TesseractOcr::new(&config.ocr_binary, &config.ocr_language);
    if ocr.is_available() {
        info!(binary = %config.ocr_binary, "OCR engine available");
    } else {
        warn!(
            binary = %config.ocr_binary,
            "OCR binary not found; attendance sheet processing will fail until it is installed"
        );
    }

    let event_bus = EventBus::new(100);
    let bind_addr = config.bind_addr();

    let state = AppState::new(db_pool, event_bus, Arc::new(config), Arc::new(ocr));
    let app = wardboard::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
