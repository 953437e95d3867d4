//! Canonical signed 32-bit sample codec shared by the audio and image converters.

/// Codec error types.
pub mod error;
pub use error::CodecError;

/// Signed/unsigned folding and per-sample PCM mapping.
pub mod canonical;
pub use canonical::{
    canonical_to_pcm16, fold_unsigned, fold_wide, pcm16_to_canonical, pcm32_from_word,
    unfold_signed, CANONICAL_MAX_UNSIGNED, FOLD_MODULUS,
};

/// RGBA pixel packing.
pub mod pixel;
pub use pixel::Rgba;

/// Converter configuration.
pub mod config;
pub use config::{
    AudioConfig, AudioDecodeMode, ImageGeometry, SampleWidth, ToneConfig, DEFAULT_IMAGE_EDGE,
    DEFAULT_SAMPLE_RATE,
};

/// Sample log text format.
pub mod log;
pub use log::{parse_log, read_log, render_log, write_log, LogWarning, ParsedLog, SkippedLine};

/// Audio conversion and peak normalization.
pub mod audio;
pub use audio::{
    audio_to_log, log_to_audio, normalize_amplitude, peak_magnitude, AudioRender, PcmFrames,
    PCM16_FULL_SCALE,
};

/// Image conversion and grid fitting.
pub mod image;
pub use image::{fit_pixels, image_to_log, log_to_image, FittedPixels, GeometryWarning};

/// Raw little-endian media framing.
pub mod raw;
pub use raw::{
    decode_raw_pcm, decode_raw_rgba, encode_raw_pcm16, encode_raw_rgba, read_media, write_media,
    RGBA_FRAME_BYTES,
};

/// Test tone synthesis.
pub mod tone;
pub use tone::{synthesize_tone, tone_sample_count};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
