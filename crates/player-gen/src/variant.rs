//! Program variants.

use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;
use crate::instruction::{Instruction, Register};

/// Which fault-handling instructions a replay loop carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Variant {
    /// Plain load/store replay.
    Clean,
    /// Injects a possible bit flip after each load.
    Glitch,
    /// Injects a possible bit flip, then checks and corrects it.
    Corrected,
}

impl Variant {
    /// All variants in emission order.
    pub const ALL: [Self; 3] = [Self::Clean, Self::Glitch, Self::Corrected];

    /// Lower-case name, also used as the file suffix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Glitch => "glitch",
            Self::Corrected => "corrected",
        }
    }

    /// Program file name for `stem`, e.g. `player_glitch.s`.
    #[must_use]
    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}_{}.s", self.name())
    }

    /// Instructions inserted between the load and the store of `data`.
    #[must_use]
    pub fn fault_handling(self, data: Register) -> Vec<Instruction> {
        let inject = Instruction::InjectFlip {
            rd: data,
            rs1: data,
            rs2: Register::ZERO,
        };
        let check = Instruction::CheckError {
            rd: data,
            rs1: data,
            rs2: Register::ZERO,
        };

        match self {
            Self::Clean => Vec::new(),
            Self::Glitch => vec![inject],
            Self::Corrected => vec![inject, check],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenerateError::UnknownVariant(s.to_string()))
    }
}
