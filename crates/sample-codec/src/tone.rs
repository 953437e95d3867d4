//! Synthetic sine test tone.

use std::f64::consts::TAU;

use crate::audio::PCM16_FULL_SCALE;
use crate::config::{AudioConfig, ToneConfig};

/// Number of samples a tone of `tone.duration_secs` spans at `audio.sample_rate`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn tone_sample_count(tone: &ToneConfig, audio: &AudioConfig) -> usize {
    (f64::from(audio.sample_rate) * tone.duration_secs).max(0.0) as usize
}

/// Generates a 16-bit sine tone.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn synthesize_tone(tone: &ToneConfig, audio: &AudioConfig) -> Vec<i16> {
    let rate = f64::from(audio.sample_rate);
    (0..tone_sample_count(tone, audio))
        .map(|k| {
            let t = k as f64 / rate;
            let wave = tone.amplitude * (TAU * tone.frequency_hz * t).sin();
            (wave * PCM16_FULL_SCALE) as i16
        })
        .collect()
}
