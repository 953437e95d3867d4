//! Replay program generation.
//!
//! A program seeds a loop counter with the trip count, points two base
//! registers at the memory-mapped source and destination buffers, then
//! copies one word per iteration until the counter reaches zero:
//!
//! ```text
//! main:
//!   lui x6, <upper>
//!   addi x6, x6, <lower>
//!   lui x7, 0x10000
//!   lui x8, 0x30000
//! loop:
//!   lwpd x10, 0(x8)
//!   <variant fault handling>
//!   sw x10, 0(x7)
//!   addi x6, x6, -1
//!   bne x6, x0, loop
//!   ecall
//! ```

use std::fmt;

use crate::error::GenerateError;
use crate::immediate::{split, ImmediatePair, UPPER_MASK};
use crate::instruction::{Instruction, Line, Radix, Register};
use crate::variant::Variant;

/// Default `lui` page of the destination buffer.
pub const DEFAULT_DEST_PAGE: u32 = 0x10000;
/// Default `lui` page of the source buffer.
pub const DEFAULT_SOURCE_PAGE: u32 = 0x30000;

/// Register assignment, buffer addresses and labels of a replay program.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ProgramLayout {
    /// Loop counter.
    pub counter: Register,
    /// Destination base address register.
    pub dest_base: Register,
    /// `lui` immediate loaded into `dest_base`.
    pub dest_page: u32,
    /// Source base address register.
    pub source_base: Register,
    /// `lui` immediate loaded into `source_base`.
    pub source_page: u32,
    /// Register carrying each sample through the loop.
    pub data: Register,
    /// Entry label.
    pub entry_label: String,
    /// Loop head label.
    pub loop_label: String,
}

impl ProgramLayout {
    /// Checks that both buffer pages fit a `lui` immediate.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::PageOutOfRange`] for the first page above
    /// [`UPPER_MASK`].
    pub fn validate(&self) -> Result<(), GenerateError> {
        for (register, page) in [
            (self.dest_base, self.dest_page),
            (self.source_base, self.source_page),
        ] {
            if page > UPPER_MASK {
                return Err(GenerateError::PageOutOfRange { register, page });
            }
        }
        Ok(())
    }
}

impl Default for ProgramLayout {
    fn default() -> Self {
        Self {
            counter: Register::T1,
            dest_base: Register::T2,
            dest_page: DEFAULT_DEST_PAGE,
            source_base: Register::S0,
            source_page: DEFAULT_SOURCE_PAGE,
            data: Register::A0,
            entry_label: "main".to_string(),
            loop_label: "loop".to_string(),
        }
    }
}

/// A generated replay program.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TestProgram {
    /// Variant this program was generated for.
    pub variant: Variant,
    /// Loop trip count.
    pub trip_count: u32,
    /// Counter seed operands.
    pub counter_seed: ImmediatePair,
    /// Program lines in order.
    pub lines: Vec<Line>,
}

impl TestProgram {
    /// Instructions in program order, labels omitted.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.lines.iter().filter_map(|line| match line {
            Line::Instr(instr) => Some(instr),
            Line::Label(_) => None,
        })
    }

    /// Number of instructions with the given mnemonic.
    #[must_use]
    pub fn count_mnemonic(&self, mnemonic: &str) -> usize {
        self.instructions()
            .filter(|i| i.mnemonic() == mnemonic)
            .count()
    }

    /// Program text, one line per entry with a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TestProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Converts a sample count into a loop trip count.
///
/// # Errors
///
/// - [`GenerateError::EmptyTripCount`] if `samples` is zero
/// - [`GenerateError::TripCountTooLarge`] if it exceeds `u32::MAX`
pub fn trip_count(samples: usize) -> Result<u32, GenerateError> {
    if samples == 0 {
        return Err(GenerateError::EmptyTripCount);
    }
    u32::try_from(samples).map_err(|_| GenerateError::TripCountTooLarge(samples))
}

fn build(
    trip_count: u32,
    seed: ImmediatePair,
    variant: Variant,
    layout: &ProgramLayout,
) -> TestProgram {
    let instr = Line::Instr;
    let mut lines = vec![
        Line::Label(layout.entry_label.clone()),
        instr(Instruction::Lui {
            rd: layout.counter,
            imm: seed.upper,
            radix: Radix::Decimal,
        }),
        instr(Instruction::Addi {
            rd: layout.counter,
            rs1: layout.counter,
            imm: seed.lower,
        }),
        instr(Instruction::Lui {
            rd: layout.dest_base,
            imm: layout.dest_page,
            radix: Radix::Hex,
        }),
        instr(Instruction::Lui {
            rd: layout.source_base,
            imm: layout.source_page,
            radix: Radix::Hex,
        }),
        Line::Label(layout.loop_label.clone()),
        instr(Instruction::Lwpd {
            rd: layout.data,
            offset: 0,
            base: layout.source_base,
        }),
    ];

    lines.extend(variant.fault_handling(layout.data).into_iter().map(instr));

    lines.extend([
        instr(Instruction::Sw {
            rs2: layout.data,
            offset: 0,
            base: layout.dest_base,
        }),
        instr(Instruction::Addi {
            rd: layout.counter,
            rs1: layout.counter,
            imm: -1,
        }),
        instr(Instruction::Bne {
            rs1: layout.counter,
            rs2: Register::ZERO,
            target: layout.loop_label.clone(),
        }),
        instr(Instruction::Ecall),
    ]);

    TestProgram {
        variant,
        trip_count,
        counter_seed: seed,
        lines,
    }
}

/// Generates the replay program for one variant.
///
/// # Errors
///
/// Returns [`GenerateError::EmptyTripCount`] if `trip_count` is zero.
pub fn generate(
    trip_count: u32,
    variant: Variant,
    layout: &ProgramLayout,
) -> Result<TestProgram, GenerateError> {
    if trip_count == 0 {
        return Err(GenerateError::EmptyTripCount);
    }
    layout.validate()?;
    Ok(build(trip_count, split(trip_count), variant, layout))
}

/// Generates all variants, splitting the trip count once.
///
/// # Errors
///
/// Returns [`GenerateError::EmptyTripCount`] if `trip_count` is zero.
pub fn generate_all(
    trip_count: u32,
    layout: &ProgramLayout,
) -> Result<[TestProgram; 3], GenerateError> {
    if trip_count == 0 {
        return Err(GenerateError::EmptyTripCount);
    }
    layout.validate()?;
    let seed = split(trip_count);
    tracing::debug!(trip_count, upper = seed.upper, lower = seed.lower, "seeding loop counter");
    Ok(Variant::ALL.map(|variant| build(trip_count, seed, variant, layout)))
}
