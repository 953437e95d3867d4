//! Canonical signed 32-bit sample representation.
//!
//! Every log value is a two's-complement `i32`. Unsigned 32-bit packings are
//! folded into that range by subtracting `0x1_0000_0000` when they exceed
//! `0x7FFF_FFFF`, and unfolded by adding it back to negative values.

/// Size of the 32-bit modular space used for folding.
pub const FOLD_MODULUS: i64 = 0x1_0000_0000;

/// Largest unsigned packing that is already canonical.
pub const CANONICAL_MAX_UNSIGNED: u32 = 0x7FFF_FFFF;

/// Folds an unsigned 32-bit packing into canonical signed range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn fold_unsigned(packed: u32) -> i32 {
    let wide = packed as i64;
    if packed > CANONICAL_MAX_UNSIGNED {
        (wide - FOLD_MODULUS) as i32
    } else {
        wide as i32
    }
}

/// Recovers the unsigned 32-bit packing of a canonical value.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn unfold_signed(value: i32) -> u32 {
    let wide = value as i64;
    if value < 0 {
        (wide + FOLD_MODULUS) as u32
    } else {
        wide as u32
    }
}

/// Canonicalises a wide integer read from text.
///
/// Accepts `[-2^31, 2^32 - 1]`: signed values pass through and unsigned
/// packings above `i32::MAX` are folded. Anything else has no 32-bit
/// representation and yields `None`.
#[must_use]
pub fn fold_wide(value: i64) -> Option<i32> {
    if let Ok(signed) = i32::try_from(value) {
        return Some(signed);
    }
    u32::try_from(value).ok().map(fold_unsigned)
}

/// Places a 16-bit PCM sample in the high half of a canonical word.
#[must_use]
pub const fn pcm16_to_canonical(sample: i16) -> i32 {
    (sample as i32) << 16
}

/// Inverse of [`pcm16_to_canonical`]: keeps the high half, discarding the low 16 bits.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn canonical_to_pcm16(value: i32) -> i16 {
    (value >> 16) as i16
}

/// Canonicalises a raw little-endian 32-bit PCM word.
#[must_use]
pub const fn pcm32_from_word(word: u32) -> i32 {
    fold_unsigned(word)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0)]
    #[case(0x7FFF_FFFF, i32::MAX)]
    #[case(0x8000_0000, i32::MIN)]
    #[case(0xFF00_00FF, -16_776_961)]
    #[case(0xFFFF_FFFF, -1)]
    fn folds_unsigned_packings(#[case] packed: u32, #[case] expected: i32) {
        assert_eq!(fold_unsigned(packed), expected);
        assert_eq!(unfold_signed(expected), packed);
    }

    #[rstest]
    #[case(-2_147_483_648, Some(i32::MIN))]
    #[case(-3, Some(-3))]
    #[case(2_147_483_648, Some(i32::MIN))]
    #[case(4_294_967_295, Some(-1))]
    #[case(4_294_967_296, None)]
    #[case(-2_147_483_649, None)]
    fn folds_wide_text_values(#[case] value: i64, #[case] expected: Option<i32>) {
        assert_eq!(fold_wide(value), expected);
    }

    #[test]
    fn pcm16_lives_in_the_high_half() {
        assert_eq!(pcm16_to_canonical(1), 0x0001_0000);
        assert_eq!(pcm16_to_canonical(-1), -65_536);
        assert_eq!(pcm16_to_canonical(i16::MIN), i32::MIN);
        assert_eq!(canonical_to_pcm16(0x0001_FFFF), 1);
    }

    #[test]
    fn pcm32_words_are_folded() {
        assert_eq!(pcm32_from_word(0x8000_0000), i32::MIN);
        assert_eq!(pcm32_from_word(12_345), 12_345);
    }

    proptest! {
        #[test]
        fn fold_is_a_bijection(packed in any::<u32>()) {
            prop_assert_eq!(unfold_signed(fold_unsigned(packed)), packed);
        }

        #[test]
        fn pcm16_round_trips_through_the_high_half(sample in any::<i16>()) {
            let canonical = pcm16_to_canonical(sample);
            prop_assert_eq!(canonical & 0xFFFF, 0);
            prop_assert_eq!(canonical_to_pcm16(canonical), sample);
        }
    }
}
