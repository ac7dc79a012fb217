//! Configuration for wardboard
//!
//! Two-tier configuration:
//! 1. **TOML bootstrap**: port, root folder, OCR engine, demo policy
//! 2. **CLI / environment overrides** at startup
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (--port, --root-folder)
//! 2. Environment variables (WARDBOARD_PORT, WARDBOARD_ROOT_FOLDER)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! The root folder holds everything the service writes: the SQLite database
//! and the `staging/` directory for uploaded files awaiting processing.

use crate::error::{Error, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "wardboard")]
#[command(about = "Ward dashboard backend: attendance OCR, meetings, transcriptions")]
pub struct Args {
    /// HTTP server port (overrides config file)
    #[arg(short, long, env = "WARDBOARD_PORT")]
    pub port: Option<u16>,

    /// Root folder for database and staged uploads (overrides config file)
    #[arg(short, long, env = "WARDBOARD_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime; restart to pick up edits.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address for the HTTP server
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Root folder for database and staged uploads (optional)
    ///
    /// If not specified, will attempt environment → OS default.
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Substitute the demo roster when a sheet yields no rows
    #[serde(default = "default_demo_fallback")]
    pub demo_fallback: bool,

    /// OCR engine configuration (optional)
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            root_folder: None,
            demo_fallback: default_demo_fallback(),
            ocr: OcrConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// OCR engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Engine binary name or path
    #[serde(default = "default_ocr_binary")]
    pub binary: String,

    /// Recognition language passed to the engine
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: default_ocr_binary(),
            language: default_ocr_language(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5730
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_demo_fallback() -> bool {
    true
}

fn default_ocr_binary() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Complete resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address for the HTTP server
    pub bind: String,

    /// HTTP server port
    pub port: u16,

    /// Root folder for everything the service writes
    pub root_folder: PathBuf,

    /// Directory for uploads awaiting processing (under the root folder)
    pub staging_dir: PathBuf,

    /// SQLite database file (under the root folder)
    pub database_path: PathBuf,

    /// Substitute the demo roster when a sheet yields no rows
    pub demo_fallback: bool,

    /// OCR engine binary name or path
    pub ocr_binary: String,

    /// Recognition language passed to the OCR engine
    pub ocr_language: String,

    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments, TOML file, and defaults
    ///
    /// clap already applied the environment fallbacks to `args`, so the
    /// priority here is args > TOML > built-in default.
    pub fn resolve(args: &Args) -> Result<Self> {
        let toml_config = match &args.config {
            Some(path) => {
                let config = load_toml_config(path)?;
                info!("Loaded TOML configuration from {}", path.display());
                config
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let config = load_toml_config(&path)?;
                    info!("Loaded TOML configuration from {}", path.display());
                    config
                }
                _ => TomlConfig::default(),
            },
        };

        let port = args.port.unwrap_or(toml_config.port);
        let root_folder = args
            .root_folder
            .clone()
            .or(toml_config.root_folder)
            .unwrap_or_else(default_root_folder);

        let staging_dir = root_folder.join("staging");
        let database_path = root_folder.join("wardboard.db");

        Ok(Self {
            bind: toml_config.bind,
            port,
            root_folder,
            staging_dir,
            database_path,
            demo_fallback: toml_config.demo_fallback,
            ocr_binary: toml_config.ocr.binary,
            ocr_language: toml_config.ocr.language,
            log_level: toml_config.logging.level,
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Create the root folder and staging directory if missing
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(&self.staging_dir)?;
        Ok(())
    }
}

/// Read and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {}: {}", path.display(), e)))
}

/// Default configuration file path for the platform
///
/// `~/.config/wardboard/wardboard.toml` on Linux and the platform
/// equivalents elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wardboard").join("wardboard.toml"))
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("wardboard"))
        .unwrap_or_else(|| PathBuf::from("./wardboard_data"))
}
