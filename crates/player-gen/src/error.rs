use std::path::PathBuf;

use sample_codec::CodecError;
use thiserror::Error;

use crate::instruction::Register;

/// Failures while generating or emitting replay programs.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A replay loop needs at least one sample.
    #[error("trip count must be positive: no samples to replay")]
    EmptyTripCount,
    /// The sample count does not fit a 32-bit loop counter.
    #[error("trip count {0} does not fit a 32-bit loop counter")]
    TripCountTooLarge(usize),
    /// A buffer page does not fit the 20-bit `lui` immediate.
    #[error("lui page {page:#x} for {register} exceeds the 20-bit immediate range")]
    PageOutOfRange {
        /// Base register the page would be loaded into.
        register: Register,
        /// Rejected page value.
        page: u32,
    },
    /// A variant name was not recognised.
    #[error("unknown variant '{0}' (expected clean, glitch or corrected)")]
    UnknownVariant(String),
    /// Reading the sample log failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Writing a program file failed.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Program file path.
        path: PathBuf,
        /// Originating I/O error.
        #[source]
        source: std::io::Error,
    },
}
