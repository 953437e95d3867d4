//! Sample log text format: one canonical decimal integer per line.
//!
//! Blank lines are ignored. Lines that do not hold a representable 32-bit
//! integer are skipped and reported, never fatal.

use std::fmt;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::canonical::fold_wide;
use crate::error::CodecError;

/// A log line that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-indexed line number.
    pub line: usize,
    /// Trimmed line text.
    pub text: String,
}

/// Non-fatal condition found while reading a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogWarning {
    /// A line held no valid 32-bit integer and was skipped.
    MalformedLine(SkippedLine),
}

impl fmt::Display for LogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine(skipped) => write!(
                f,
                "line {}: skipping malformed sample '{}'",
                skipped.line, skipped.text
            ),
        }
    }
}

/// Result of parsing log text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    /// Canonical samples in file order.
    pub samples: Vec<i32>,
    /// Lines that were dropped.
    pub skipped: Vec<SkippedLine>,
}

impl ParsedLog {
    /// Number of valid samples, i.e. the replay trip count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no valid sample was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Warnings for every skipped line, in file order.
    pub fn warnings(&self) -> impl Iterator<Item = LogWarning> + '_ {
        self.skipped.iter().cloned().map(LogWarning::MalformedLine)
    }
}

/// Parses log text into canonical samples.
#[must_use]
pub fn parse_log(text: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_sample(line) {
            Some(value) => parsed.samples.push(value),
            None => {
                tracing::debug!(line = idx + 1, text = line, "skipping malformed log line");
                parsed.skipped.push(SkippedLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    parsed
}

fn parse_sample(line: &str) -> Option<i32> {
    line.parse::<i64>().ok().and_then(fold_wide)
}

/// Renders samples as log text, one value per line with a trailing newline.
#[must_use]
pub fn render_log(samples: &[i32]) -> String {
    let mut out = String::with_capacity(samples.len() * 8);
    for sample in samples {
        let _ = writeln!(out, "{sample}");
    }
    out
}

/// Reads and parses a log file.
///
/// # Errors
///
/// - [`CodecError::MissingInput`] if the file does not exist
/// - [`CodecError::Io`] for any other read failure
/// - [`CodecError::EmptyLog`] if no line holds a valid sample
pub fn read_log(path: &Path) -> Result<ParsedLog, CodecError> {
    let text = fs::read_to_string(path).map_err(|e| CodecError::from_io(path, e))?;
    let parsed = parse_log(&text);
    if parsed.is_empty() {
        return Err(CodecError::EmptyLog {
            path: path.to_path_buf(),
        });
    }
    Ok(parsed)
}

/// Writes samples to a log file, replacing any existing content.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be written.
pub fn write_log(path: &Path, samples: &[i32]) -> Result<(), CodecError> {
    fs::write(path, render_log(samples)).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })
}
