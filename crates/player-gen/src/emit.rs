//! Writing generated programs to disk.

use std::fs;
use std::path::{Path, PathBuf};

use sample_codec::{read_log, LogWarning};

use crate::error::GenerateError;
use crate::program::{generate_all, trip_count, ProgramLayout, TestProgram};

/// Default file stem for generated programs.
pub const DEFAULT_STEM: &str = "player";

/// Programs generated from a sample log, with the log's warnings.
#[derive(Debug, Clone)]
pub struct ReplaySet {
    /// One program per variant, in [`crate::Variant::ALL`] order.
    pub programs: [TestProgram; 3],
    /// Non-fatal issues found while reading the log.
    pub warnings: Vec<LogWarning>,
}

impl ReplaySet {
    /// Shared loop trip count.
    #[must_use]
    pub const fn trip_count(&self) -> u32 {
        self.programs[0].trip_count
    }
}

/// Reads a sample log and generates every variant for its sample count.
///
/// # Errors
///
/// Returns [`GenerateError::Codec`] if the log is missing, unreadable or
/// empty, and [`GenerateError::TripCountTooLarge`] if it holds more than
/// `u32::MAX` samples.
pub fn replay_log(path: &Path, layout: &ProgramLayout) -> Result<ReplaySet, GenerateError> {
    let parsed = read_log(path)?;
    let count = trip_count(parsed.len())?;
    let programs = generate_all(count, layout)?;
    Ok(ReplaySet {
        programs,
        warnings: parsed.warnings().collect(),
    })
}

/// Writes each program to `dir/<stem>_<variant>.s`, replacing existing files.
///
/// Returns the written paths in input order.
///
/// # Errors
///
/// Returns [`GenerateError::Write`] on the first file that cannot be written.
pub fn write_programs(
    dir: &Path,
    stem: &str,
    programs: &[TestProgram],
) -> Result<Vec<PathBuf>, GenerateError> {
    programs
        .iter()
        .map(|program| -> Result<PathBuf, GenerateError> {
            let path = dir.join(program.variant.file_name(stem));
            fs::write(&path, program.render()).map_err(|source| GenerateError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), variant = %program.variant, "wrote program");
            Ok(path)
        })
        .collect()
}
