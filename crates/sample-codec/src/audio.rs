//! Audio conversion between PCM frames and canonical logs.
//!
//! 16-bit PCM uses the high-half convention in both directions: a sample `s`
//! is logged as `s << 16` and recovered exactly with an arithmetic `>> 16`.
//! Peak normalization is a separate, lossy path for logs that did not come
//! from PCM.

use crate::canonical::{canonical_to_pcm16, pcm16_to_canonical};
use crate::config::AudioDecodeMode;

/// Full-scale magnitude of 16-bit output.
pub const PCM16_FULL_SCALE: f64 = 32_767.0;

/// Decoded PCM samples as delivered by a media codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcmFrames {
    /// Signed 16-bit samples.
    Pcm16(Vec<i16>),
    /// Signed 32-bit samples.
    Pcm32(Vec<i32>),
}

impl PcmFrames {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Pcm16(samples) => samples.len(),
            Self::Pcm32(samples) => samples.len(),
        }
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of rendering a log as 16-bit audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRender {
    /// Playable samples.
    Rendered(Vec<i16>),
    /// The stream has no dynamic range; nothing to play.
    Silent,
}

/// Converts PCM frames to canonical log samples.
#[must_use]
pub fn audio_to_log(frames: &PcmFrames) -> Vec<i32> {
    match frames {
        PcmFrames::Pcm16(samples) => samples.iter().copied().map(pcm16_to_canonical).collect(),
        PcmFrames::Pcm32(samples) => samples.clone(),
    }
}

/// Largest absolute magnitude in the stream.
#[must_use]
pub fn peak_magnitude(samples: &[i32]) -> u32 {
    samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

/// Scales a whole stream so its peak lands on 16-bit full scale.
///
/// The peak is found over the complete buffer before any sample is scaled.
/// Returns `None` when every sample is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_amplitude(samples: &[i32]) -> Option<Vec<i16>> {
    let peak = peak_magnitude(samples);
    if peak == 0 {
        return None;
    }

    let peak = f64::from(peak);
    Some(
        samples
            .iter()
            .map(|&s| (f64::from(s) / peak * PCM16_FULL_SCALE) as i16)
            .collect(),
    )
}

/// Renders canonical samples as 16-bit audio.
#[must_use]
pub fn log_to_audio(samples: &[i32], mode: AudioDecodeMode) -> AudioRender {
    match mode {
        AudioDecodeMode::Normalize => {
            normalize_amplitude(samples).map_or(AudioRender::Silent, AudioRender::Rendered)
        }
        AudioDecodeMode::Exact => {
            if samples.iter().all(|&s| s == 0) {
                AudioRender::Silent
            } else {
                AudioRender::Rendered(samples.iter().copied().map(canonical_to_pcm16).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[test]
    fn pcm16_frames_move_to_the_high_half() {
        let log = audio_to_log(&PcmFrames::Pcm16(vec![1, -1, 0]));
        assert_eq!(log, vec![65_536, -65_536, 0]);
    }

    #[test]
    fn pcm32_frames_are_identity() {
        let frames = PcmFrames::Pcm32(vec![i32::MIN, 7, i32::MAX]);
        assert_eq!(audio_to_log(&frames), vec![i32::MIN, 7, i32::MAX]);
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn normalization_scales_peak_to_full_scale() {
        let scaled = normalize_amplitude(&[10, -5, 0, -10]).expect("non-silent stream");
        assert_eq!(scaled, vec![32_767, -16_383, 0, -32_767]);
    }

    #[test]
    fn normalization_handles_the_most_negative_word() {
        let scaled = normalize_amplitude(&[i32::MIN, 0]).expect("non-silent stream");
        assert_eq!(scaled, vec![-32_767, 0]);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0, 0, 0])]
    fn silent_streams_produce_no_audio(#[case] samples: &[i32]) {
        assert_eq!(normalize_amplitude(samples), None);
        assert_eq!(
            log_to_audio(samples, AudioDecodeMode::Normalize),
            AudioRender::Silent
        );
        assert_eq!(log_to_audio(samples, AudioDecodeMode::Exact), AudioRender::Silent);
    }

    #[test]
    fn exact_decode_inverts_pcm16_encoding() {
        let source = vec![-32_768, -2, 0, 3, 32_767];
        let log = audio_to_log(&PcmFrames::Pcm16(source.clone()));
        assert_eq!(
            log_to_audio(&log, AudioDecodeMode::Exact),
            AudioRender::Rendered(source)
        );
    }

    proptest! {
        #[test]
        fn normalized_output_stays_within_full_scale(samples in prop::collection::vec(any::<i32>(), 1..64)) {
            if let Some(scaled) = normalize_amplitude(&samples) {
                prop_assert_eq!(scaled.len(), samples.len());
                for (out, inp) in scaled.iter().zip(&samples) {
                    prop_assert!(out.unsigned_abs() <= 32_767);
                    prop_assert!(*inp == 0 || out.signum() == 0 || i32::from(out.signum()) == inp.signum());
                }
            } else {
                prop_assert!(samples.iter().all(|&s| s == 0));
            }
        }
    }
}
