//! Headerless little-endian media framing.
//!
//! Stands in for container codecs: raw PCM is interleaved `s16le` or `s32le`
//! samples and raw images are row-major `R,G,B,A` byte quadruples.

use std::fs;
use std::path::Path;

use crate::audio::PcmFrames;
use crate::config::SampleWidth;
use crate::error::CodecError;
use crate::pixel::Rgba;

/// Bytes per raw RGBA pixel.
pub const RGBA_FRAME_BYTES: usize = 4;

fn check_frames(len: usize, frame: usize) -> Result<(), CodecError> {
    if len % frame == 0 {
        Ok(())
    } else {
        Err(CodecError::TruncatedFrame { len, frame })
    }
}

/// Decodes raw PCM bytes of the given width.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedFrame`] if `bytes` is not a whole number of samples.
pub fn decode_raw_pcm(bytes: &[u8], width: SampleWidth) -> Result<PcmFrames, CodecError> {
    check_frames(bytes.len(), width.bytes())?;

    Ok(match width {
        SampleWidth::Pcm16 => PcmFrames::Pcm16(
            bytes
                .chunks_exact(2)
                .map(|c| i16::from_le_bytes([c[0], c[1]]))
                .collect(),
        ),
        SampleWidth::Pcm32 => PcmFrames::Pcm32(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
    })
}

/// Encodes 16-bit samples as raw `s16le` bytes.
#[must_use]
pub fn encode_raw_pcm16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Decodes raw RGBA bytes.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedFrame`] if `bytes` is not a whole number of pixels.
pub fn decode_raw_rgba(bytes: &[u8]) -> Result<Vec<Rgba>, CodecError> {
    check_frames(bytes.len(), RGBA_FRAME_BYTES)?;
    Ok(bytes
        .chunks_exact(RGBA_FRAME_BYTES)
        .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
        .collect())
}

/// Encodes pixels as raw RGBA bytes.
#[must_use]
pub fn encode_raw_rgba(pixels: &[Rgba]) -> Vec<u8> {
    pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect()
}

/// Reads a whole media file.
///
/// # Errors
///
/// Returns [`CodecError::MissingInput`] or [`CodecError::Io`].
pub fn read_media(path: &Path) -> Result<Vec<u8>, CodecError> {
    fs::read(path).map_err(|e| CodecError::from_io(path, e))
}

/// Writes a whole media file, replacing any existing content.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be written.
pub fn write_media(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    fs::write(path, bytes).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })
}
