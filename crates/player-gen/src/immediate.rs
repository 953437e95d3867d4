//! `lui` + `addi` immediate materialization.
//!
//! `addi` sign-extends its 12-bit immediate, so whenever bit 11 of the low
//! field is set the upper field is bumped by one to cancel the negative
//! contribution. Reconstruction wraps modulo 2^32, matching RV32 registers.

/// Mask of the 20-bit `lui` field.
pub const UPPER_MASK: u32 = 0xF_FFFF;
/// Mask of the 12-bit `addi` field.
pub const LOWER_MASK: u32 = 0xFFF;
/// Sign bit of the 12-bit `addi` field.
pub const LOWER_SIGN_BIT: u32 = 0x800;

/// Operands for a `lui rd, upper` / `addi rd, rd, lower` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ImmediatePair {
    /// 20-bit `lui` immediate.
    pub upper: u32,
    /// Signed 12-bit `addi` immediate (`-2048..=2047`).
    pub lower: i16,
}

impl ImmediatePair {
    /// Raw 12-bit encoding of [`Self::lower`].
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn lower_bits(self) -> u16 {
        (self.lower as u16) & (LOWER_MASK as u16)
    }

    /// Value left in the destination register after `lui` then `addi`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn reconstruct(self) -> u32 {
        (self.upper << 12).wrapping_add(self.lower as i32 as u32)
    }
}

/// Interprets a 12-bit field as two's complement.
#[must_use]
pub const fn sign_extend12(field: u16) -> i32 {
    let field = (field as i32) & LOWER_MASK as i32;
    if field & LOWER_SIGN_BIT as i32 != 0 {
        field - 0x1000
    } else {
        field
    }
}

/// Splits `value` into `lui`/`addi` operands.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn split(value: u32) -> ImmediatePair {
    if value == 0 {
        return ImmediatePair { upper: 0, lower: 0 };
    }

    let mut upper = (value >> 12) & UPPER_MASK;
    let lower = value & LOWER_MASK;
    if lower & LOWER_SIGN_BIT != 0 {
        upper = (upper + 1) & UPPER_MASK;
    }

    ImmediatePair {
        upper,
        lower: sign_extend12(lower as u16) as i16,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 0, 3)]
    #[case(0x7FF, 0, 2047)]
    #[case(0x800, 1, -2048)]
    #[case(0xFFF, 1, -1)]
    #[case(0x1000, 1, 0)]
    #[case(220_500, 54, -684)]
    #[case(65_536, 16, 0)]
    #[case(0x7FFF_FFFF, 0x8_0000, -1)]
    #[case(0xFFFF_F7FF, 0xF_FFFF, 2047)]
    #[case(0xFFFF_F800, 0, -2048)]
    #[case(0xFFFF_FFFF, 0, -1)]
    fn splits_known_values(#[case] value: u32, #[case] upper: u32, #[case] lower: i16) {
        let pair = split(value);
        assert_eq!(pair, ImmediatePair { upper, lower });
        assert_eq!(pair.reconstruct(), value);
    }

    #[rstest]
    #[case(0x000, 0)]
    #[case(0x7FF, 2047)]
    #[case(0x800, -2048)]
    #[case(0xFFF, -1)]
    #[case(0x1801, -2047)]
    fn sign_extends_twelve_bit_fields(#[case] field: u16, #[case] expected: i32) {
        assert_eq!(sign_extend12(field), expected);
    }

    #[test]
    fn lower_bits_are_the_raw_field() {
        assert_eq!(split(0x800).lower_bits(), 0x800);
        assert_eq!(split(0xFFF).lower_bits(), 0xFFF);
        assert_eq!(split(3).lower_bits(), 3);
    }

    proptest! {
        #[test]
        fn split_reconstructs_every_u32(value in any::<u32>()) {
            let pair = split(value);
            prop_assert!(pair.upper <= UPPER_MASK);
            prop_assert!((-2048..=2047).contains(&pair.lower));
            let rebuilt = (pair.upper << 12).wrapping_add(sign_extend12(pair.lower_bits()) as u32);
            prop_assert_eq!(rebuilt, value);
            prop_assert_eq!(pair.reconstruct(), value);
        }

        #[test]
        fn values_below_the_wrap_point_reconstruct_without_wrapping(value in 0u32..0xFFFF_F800) {
            let pair = split(value);
            let exact = (i64::from(pair.upper) << 12) + i64::from(pair.lower);
            prop_assert_eq!(exact, i64::from(value));
        }
    }
}
