//! Fault-injection replay program generator for canonical sample logs.
//!
//! A sample log's valid line count becomes the trip count of a load/store
//! loop. The count is materialized with a `lui`/`addi` pair and the loop is
//! emitted in three variants: clean, glitch (bit-flip injection) and
//! corrected (injection followed by check-and-correct).

/// Generator error types.
pub mod error;
pub use error::GenerateError;

/// `lui`/`addi` immediate splitting.
pub mod immediate;
pub use immediate::{sign_extend12, split, ImmediatePair, LOWER_MASK, LOWER_SIGN_BIT, UPPER_MASK};

/// Typed instruction and program-line model.
pub mod instruction;
pub use instruction::{
    Instruction, Line, Radix, Register, CHECK_ERROR_MNEMONIC, INJECT_FLIP_MNEMONIC, REGISTER_COUNT,
};

/// Program variants.
pub mod variant;
pub use variant::Variant;

/// Replay program construction.
pub mod program;
pub use program::{
    generate, generate_all, trip_count, ProgramLayout, TestProgram, DEFAULT_DEST_PAGE,
    DEFAULT_SOURCE_PAGE,
};

/// Program file emission.
pub mod emit;
pub use emit::{replay_log, write_programs, ReplaySet, DEFAULT_STEM};

// Only the binary installs a subscriber.
use tracing_subscriber as _;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
