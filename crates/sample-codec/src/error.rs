use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures raised while reading, writing or framing sample data.
///
/// Malformed log lines and pixel-count mismatches are not errors; they are
/// surfaced as warnings alongside the decoded data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A required input file does not exist.
    #[error("input file '{path}' does not exist")]
    MissingInput {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// A log file exists but holds no valid sample lines.
    #[error("log file '{path}' contains no samples")]
    EmptyLog {
        /// Path of the empty log.
        path: PathBuf,
    },
    /// A raw media buffer does not divide evenly into frames.
    #[error("raw buffer of {len} bytes is not a whole number of {frame}-byte frames")]
    TruncatedFrame {
        /// Buffer length in bytes.
        len: usize,
        /// Size of one frame in bytes.
        frame: usize,
    },
    /// Underlying file-system failure.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Originating I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Wraps an I/O error for `path`, mapping `NotFound` to [`CodecError::MissingInput`].
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingInput { path }
        } else {
            Self::Io { path, source }
        }
    }
}
