//! RGBA pixel packing into canonical words.
//!
//! Bit layout of the unsigned packing: `[A:8][R:8][G:8][B:8]`.

use crate::canonical::{fold_unsigned, unfold_signed};

/// One 8-bit-per-channel pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Padding pixel used when a log is shorter than the target image.
    pub const OPAQUE_BLACK: Self = Self::new(0, 0, 0, 255);

    /// Creates a pixel from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the unsigned `ARGB` packing.
    #[must_use]
    pub const fn packed(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Extracts channels from an unsigned `ARGB` packing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Encodes the pixel as a canonical signed word.
    #[must_use]
    pub const fn pack(self) -> i32 {
        fold_unsigned(self.packed())
    }

    /// Decodes a canonical signed word back into a pixel.
    #[must_use]
    pub const fn unpack(value: i32) -> Self {
        Self::from_packed(unfold_signed(value))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::Rgba;

    #[test]
    fn opaque_red_packs_negative() {
        let red = Rgba::new(255, 0, 0, 255);
        assert_eq!(red.packed(), 0xFFFF_0000);
        assert_eq!(red.pack(), -65_536);
        assert_eq!(Rgba::unpack(-65_536), red);
    }

    #[test]
    fn channel_positions_follow_argb_order() {
        let pixel = Rgba::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(pixel.packed(), 0x4411_2233);
        assert_eq!(pixel.pack(), 0x4411_2233);
    }

    #[test]
    fn sign_boundary_pixel_is_canonical_minimum() {
        let pixel = Rgba::new(0, 0, 0, 0x80);
        assert_eq!(pixel.packed(), 0x8000_0000);
        assert_eq!(pixel.pack(), i32::MIN);
        assert_eq!(Rgba::unpack(i32::MIN).packed(), 0x8000_0000);
    }

    #[test]
    fn opaque_blue_round_trips_through_negative_word() {
        let pixel = Rgba::new(0, 0, 255, 255);
        assert_eq!(pixel.packed(), 0xFF00_00FF);
        assert_eq!(pixel.pack(), -16_776_961);
        assert_eq!(Rgba::unpack(-16_776_961), pixel);
    }

    proptest! {
        #[test]
        fn pack_unpack_is_identity(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
            let pixel = Rgba::new(r, g, b, a);
            prop_assert_eq!(Rgba::unpack(pixel.pack()), pixel);
        }
    }
}
