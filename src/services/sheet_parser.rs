//! Attendance sheet line parser
//!
//! Turns recognized text lines into structured attendance records. The input
//! is whatever the OCR engine produced for a hand-marked paper roster: one
//! line per member, with a checkmark somewhere on the line when they were
//! present, plus assorted recognition noise.
//!
//! Parsing runs in a fixed order:
//! 1. discard noise lines (trimmed length of three characters or fewer)
//! 2. assign each surviving line a positional index
//! 3. detect and strip presence markers, derive a name (first two words)
//! 4. discard records whose final name is two characters or shorter
//!
//! Indexes are assigned in step 2 and survive step 4 unchanged, so record
//! ids keep gaps where a short-name record was dropped. Listings keyed on
//! the ids rely on them not being renumbered.

use crate::models::AttendanceRecord;
use crate::services::ocr::RecognizedDocument;

/// Characters accepted as evidence that a row marks somebody present
const PRESENCE_MARKERS: [char; 4] = ['✓', '√', 'X', 'x'];

/// Trimmed lines of at most this many characters are recognition noise
const NOISE_MAX_CHARS: usize = 3;

/// Records whose final name has at most this many characters are dropped
const NAME_MIN_CHARS: usize = 2;

/// Line-level presence-mark detection strategy
///
/// The glyph-set implementation below is the default. Isolating detection
/// here lets a trained mark classifier slot in without touching the parser.
pub trait MarkerDetector: Send + Sync {
    /// Whether the line carries a presence mark
    fn detect(&self, line: &str) -> bool;

    /// The line with marker characters removed, for name extraction
    fn strip(&self, line: &str) -> String;
}

/// Fixed glyph-set detector: checkmark glyphs plus the letter X in either case
///
/// An `x` anywhere on a line counts as a mark, including inside a name:
/// "Maxwell Jones" reads as present and loses the `x`. Known false positive,
/// kept because the sheets in circulation use handwritten x-marks that OCR
/// cannot tell apart from the letter.
#[derive(Debug, Clone, Default)]
pub struct GlyphMarkerDetector;

impl MarkerDetector for GlyphMarkerDetector {
    fn detect(&self, line: &str) -> bool {
        line.chars().any(|c| PRESENCE_MARKERS.contains(&c))
    }

    fn strip(&self, line: &str) -> String {
        line.chars()
            .filter(|c| !PRESENCE_MARKERS.contains(c))
            .collect()
    }
}

/// Attendance sheet parser
pub struct SheetParser {
    detector: Box<dyn MarkerDetector>,
}

impl SheetParser {
    /// Create a parser with a specific marker detection strategy
    pub fn new(detector: Box<dyn MarkerDetector>) -> Self {
        Self { detector }
    }

    /// Parse a recognized document into attendance records
    pub fn parse(&self, document: &RecognizedDocument) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = document
            .lines
            .iter()
            .filter(|line| line.trim().chars().count() > NOISE_MAX_CHARS)
            .enumerate()
            .map(|(index, line)| {
                let present = self.detector.detect(line);
                let name = self.derive_name(line, index);
                AttendanceRecord {
                    id: format!("member-{}", index),
                    name,
                    present,
                }
            })
            .collect();

        // Short names are discarded after ids were assigned; gaps are expected
        records.retain(|record| record.name.chars().count() > NAME_MIN_CHARS);
        records
    }

    /// First two whitespace-separated words of the marker-stripped line
    ///
    /// Rows that are nothing but markers get a positional placeholder name.
    fn derive_name(&self, line: &str, index: usize) -> String {
        let stripped = self.detector.strip(line);
        let name = stripped
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            format!("Member {}", index + 1)
        } else {
            name
        }
    }
}

impl Default for SheetParser {
    fn default() -> Self {
        Self::new(Box::new(GlyphMarkerDetector))
    }
}
