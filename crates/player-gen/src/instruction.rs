//! Typed instruction model for generated replay programs.
//!
//! Only the instructions a replay loop needs are modelled. Each renders to
//! one line of assembler text through `Display`.

use std::fmt;

/// Number of integer registers (`x0..x31`).
pub const REGISTER_COUNT: u8 = 32;

/// Integer register `xN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Register(u8);

impl Register {
    /// Hard-wired zero register.
    pub const ZERO: Self = Self(0);
    /// `t1` (`x6`).
    pub const T1: Self = Self(6);
    /// `t2` (`x7`).
    pub const T2: Self = Self(7);
    /// `s0` (`x8`).
    pub const S0: Self = Self(8);
    /// `a0` (`x10`).
    pub const A0: Self = Self(10);

    /// Returns register `xN`, or `None` if `n` is out of range.
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n < REGISTER_COUNT {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Register number.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Radix used when printing a `lui` immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Radix {
    /// Plain decimal, used for computed values.
    Decimal,
    /// `0x`-prefixed hexadecimal, used for fixed addresses.
    Hex,
}

/// Mnemonic of the fault-injection instruction.
pub const INJECT_FLIP_MNEMONIC: &str = "injectFlip";
/// Mnemonic of the fault check/correct instruction.
pub const CHECK_ERROR_MNEMONIC: &str = "checkError";

/// One machine instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// `lui rd, imm`: load a 20-bit upper immediate.
    Lui {
        /// Destination.
        rd: Register,
        /// 20-bit immediate.
        imm: u32,
        /// Print radix.
        radix: Radix,
    },
    /// `addi rd, rs1, imm`: add a sign-extended 12-bit immediate.
    Addi {
        /// Destination.
        rd: Register,
        /// Source.
        rs1: Register,
        /// Signed 12-bit immediate.
        imm: i16,
    },
    /// `lwpd rd, offset(base)`: load a word from a memory-mapped source.
    Lwpd {
        /// Destination.
        rd: Register,
        /// Byte offset.
        offset: i16,
        /// Base address register.
        base: Register,
    },
    /// `sw rs2, offset(base)`: store a word.
    Sw {
        /// Value to store.
        rs2: Register,
        /// Byte offset.
        offset: i16,
        /// Base address register.
        base: Register,
    },
    /// `injectFlip rd, rs1, rs2`: possibly flip one bit of `rs1`.
    InjectFlip {
        /// Destination.
        rd: Register,
        /// Source word.
        rs1: Register,
        /// Unused operand.
        rs2: Register,
    },
    /// `checkError rd, rs1, rs2`: detect and correct a single-bit fault.
    CheckError {
        /// Destination.
        rd: Register,
        /// Source word.
        rs1: Register,
        /// Unused operand.
        rs2: Register,
    },
    /// `bne rs1, rs2, label`.
    Bne {
        /// First comparand.
        rs1: Register,
        /// Second comparand.
        rs2: Register,
        /// Branch target label.
        target: String,
    },
    /// `ecall`: end of program.
    Ecall,
}

impl Instruction {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Lui { .. } => "lui",
            Self::Addi { .. } => "addi",
            Self::Lwpd { .. } => "lwpd",
            Self::Sw { .. } => "sw",
            Self::InjectFlip { .. } => INJECT_FLIP_MNEMONIC,
            Self::CheckError { .. } => CHECK_ERROR_MNEMONIC,
            Self::Bne { .. } => "bne",
            Self::Ecall => "ecall",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match self {
            Self::Lui {
                rd,
                imm,
                radix: Radix::Decimal,
            } => write!(f, "{m} {rd}, {imm}"),
            Self::Lui {
                rd,
                imm,
                radix: Radix::Hex,
            } => write!(f, "{m} {rd}, {imm:#x}"),
            Self::Addi { rd, rs1, imm } => write!(f, "{m} {rd}, {rs1}, {imm}"),
            Self::Lwpd { rd, offset, base } => write!(f, "{m} {rd}, {offset}({base})"),
            Self::Sw { rs2, offset, base } => write!(f, "{m} {rs2}, {offset}({base})"),
            Self::InjectFlip { rd, rs1, rs2 } | Self::CheckError { rd, rs1, rs2 } => {
                write!(f, "{m} {rd}, {rs1}, {rs2}")
            }
            Self::Bne { rs1, rs2, target } => write!(f, "{m} {rs1}, {rs2}, {target}"),
            Self::Ecall => f.write_str(m),
        }
    }
}

/// One line of program text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Line {
    /// `name:`
    Label(String),
    /// Indented instruction.
    Instr(Instruction),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(name) => write!(f, "{name}:"),
            Self::Instr(instr) => write!(f, "  {instr}"),
        }
    }
}
