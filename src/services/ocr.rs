//! Text recognition for attendance sheet images
//!
//! Wraps the external Tesseract command-line tool. The engine sits behind the
//! [`OcrEngine`] trait so handlers and tests can run against a substitute
//! without an installed binary.

use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// OCR engine errors
#[derive(Debug, Error)]
pub enum OcrError {
    /// Engine binary not found in PATH
    #[error("OCR binary not found: {0}")]
    BinaryNotFound(String),

    /// Failed to execute the engine
    #[error("Failed to execute OCR engine: {0}")]
    ExecutionError(String),

    /// Engine ran but reported failure
    #[error("Text recognition failed: {0}")]
    RecognitionFailed(String),

    /// Image file not found at path
    #[error("Image file not found: {0}")]
    FileNotFound(String),

    /// I/O error (file read/write)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Recognized text, split into non-blank lines
///
/// Blank and whitespace-only lines are dropped here; further filtering (noise
/// rows, short names) belongs to the sheet parser.
#[derive(Debug, Clone, Default)]
pub struct RecognizedDocument {
    /// Non-blank text lines in reading order
    pub lines: Vec<String>,
}

impl RecognizedDocument {
    /// Build a document from raw engine output
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect();
        Self { lines }
    }

    /// Whether no text was recognized at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Text recognition engine interface
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an image file
    async fn recognize(&self, image: &Path) -> Result<RecognizedDocument, OcrError>;
}

/// Tesseract command-line engine
///
/// Invokes `tesseract <image> stdout -l <language>` and captures stdout.
pub struct TesseractOcr {
    binary_path: String,
    language: String,
}

impl TesseractOcr {
    /// Create a new Tesseract client
    pub fn new(binary_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            language: language.into(),
        }
    }

    /// Check whether the configured binary is runnable
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary_path)
            .arg("--version")
            .output()
            .is_ok()
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &Path) -> Result<RecognizedDocument, OcrError> {
        if !image.exists() {
            return Err(OcrError::FileNotFound(image.display().to_string()));
        }

        tracing::debug!(
            image = %image.display(),
            language = %self.language,
            "Running text recognition"
        );

        // Command::output blocks, so run it off the async runtime
        let output = tokio::task::spawn_blocking({
            let binary = self.binary_path.clone();
            let language = self.language.clone();
            let image = image.to_path_buf();

            move || {
                Command::new(&binary)
                    .arg(&image)
                    .arg("stdout")
                    .args(["-l", &language])
                    .output()
            }
        })
        .await
        .map_err(|e| OcrError::ExecutionError(format!("Task join error: {}", e)))?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OcrError::BinaryNotFound(self.binary_path.clone())
            } else {
                OcrError::ExecutionError(e.to_string())
            }
        })?;

        // Tesseract logs progress and warnings to stderr even on success
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!(engine_output = %stderr.trim(), "OCR engine stderr");
        }

        if !output.status.success() {
            return Err(OcrError::RecognitionFailed(format!(
                "Exit code: {:?}, stderr: {}",
                output.status.code(),
                stderr
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let document = RecognizedDocument::from_text(&text);

        tracing::info!(
            image = %image.display(),
            lines = document.lines.len(),
            "Text recognition completed"
        );

        Ok(document)
    }
}
