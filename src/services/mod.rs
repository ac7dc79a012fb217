//! Service modules for the ward dashboard
//!
//! The attendance pipeline is `ocr` (image → text lines) followed by
//! `sheet_parser` (text lines → attendance records), with `demo` supplying
//! the fallback roster. `transcriber` is the stand-in transcription job.

pub mod demo;
pub mod ocr;
pub mod sheet_parser;
pub mod transcriber;

pub use demo::{demo_roster, DEMO_MESSAGE};
pub use ocr::{OcrEngine, OcrError, RecognizedDocument, TesseractOcr};
pub use sheet_parser::{GlyphMarkerDetector, MarkerDetector, SheetParser};
