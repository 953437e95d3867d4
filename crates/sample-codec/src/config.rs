//! Explicit configuration passed into the converters.

/// Default audio sample rate in hertz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// Default square image edge in pixels.
pub const DEFAULT_IMAGE_EDGE: u32 = 256;

/// Width of one raw PCM sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SampleWidth {
    /// Signed 16-bit samples, stored in the high half of the canonical word.
    #[default]
    Pcm16,
    /// Signed 32-bit samples, stored as-is.
    Pcm32,
}

impl SampleWidth {
    /// Size of one sample in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Pcm16 => 2,
            Self::Pcm32 => 4,
        }
    }

    /// Parses a bit width (`16` or `32`).
    #[must_use]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Self::Pcm16),
            32 => Some(Self::Pcm32),
            _ => None,
        }
    }
}

/// How canonical words are turned back into 16-bit audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AudioDecodeMode {
    /// Scale by the stream's peak magnitude to full 16-bit range. Lossy.
    #[default]
    Normalize,
    /// Take the high half of each word, inverting 16-bit PCM encoding exactly.
    Exact,
}

/// Audio stream parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AudioConfig {
    /// Samples per second.
    pub sample_rate: u32,
    /// Raw sample width for media input.
    pub width: SampleWidth,
    /// Decode strategy for log-to-audio conversion.
    pub decode_mode: AudioDecodeMode,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            width: SampleWidth::default(),
            decode_mode: AudioDecodeMode::default(),
        }
    }
}

/// Fixed target image grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ImageGeometry {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageGeometry {
    /// Creates a geometry of `width` by `height` pixels.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels in the grid.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EDGE, DEFAULT_IMAGE_EDGE)
    }
}

/// Parameters of the synthetic test tone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ToneConfig {
    /// Tone frequency in hertz.
    pub frequency_hz: f64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Peak amplitude as a fraction of full scale.
    pub amplitude: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 440.0,
            duration_secs: 5.0,
            amplitude: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_media() {
        assert_eq!(AudioConfig::default().sample_rate, 44_100);
        assert_eq!(ImageGeometry::default().pixel_count(), 65_536);
        assert_eq!(AudioConfig::default().decode_mode, AudioDecodeMode::Normalize);
    }

    #[test]
    fn sample_width_from_bits() {
        assert_eq!(SampleWidth::from_bits(16), Some(SampleWidth::Pcm16));
        assert_eq!(SampleWidth::from_bits(32), Some(SampleWidth::Pcm32));
        assert_eq!(SampleWidth::from_bits(24), None);
        assert_eq!(SampleWidth::Pcm32.bytes(), 4);
    }
}
