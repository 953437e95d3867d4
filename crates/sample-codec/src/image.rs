//! Image conversion between RGBA pixels and canonical logs.

use std::fmt;

use crate::config::ImageGeometry;
use crate::pixel::Rgba;

/// Non-fatal mismatch between a pixel stream and the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryWarning {
    /// Fewer pixels than the grid holds; the tail was padded with opaque black.
    Padded {
        /// Pixels decoded from the log.
        found: usize,
        /// Pixels required by the grid.
        expected: usize,
    },
    /// More pixels than the grid holds; the excess was dropped.
    Truncated {
        /// Pixels decoded from the log.
        found: usize,
        /// Pixels required by the grid.
        expected: usize,
    },
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Padded { found, expected } => write!(
                f,
                "log has fewer pixels ({found}) than expected ({expected}); padding with black"
            ),
            Self::Truncated { found, expected } => write!(
                f,
                "log has more pixels ({found}) than expected ({expected}); truncating"
            ),
        }
    }
}

/// Pixels sized to exactly fill a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedPixels {
    /// Row-major pixels, exactly `geometry.pixel_count()` long.
    pub pixels: Vec<Rgba>,
    /// Set when padding or truncation was applied.
    pub warning: Option<GeometryWarning>,
}

/// Pads or truncates `pixels` to fill `geometry`.
#[must_use]
pub fn fit_pixels(mut pixels: Vec<Rgba>, geometry: ImageGeometry) -> FittedPixels {
    let expected = geometry.pixel_count();
    let found = pixels.len();

    let warning = match found.cmp(&expected) {
        std::cmp::Ordering::Less => {
            pixels.resize(expected, Rgba::OPAQUE_BLACK);
            Some(GeometryWarning::Padded { found, expected })
        }
        std::cmp::Ordering::Greater => {
            pixels.truncate(expected);
            Some(GeometryWarning::Truncated { found, expected })
        }
        std::cmp::Ordering::Equal => None,
    };

    FittedPixels { pixels, warning }
}

/// Encodes pixels as canonical log samples.
#[must_use]
pub fn image_to_log(pixels: &[Rgba]) -> Vec<i32> {
    pixels.iter().map(|p| p.pack()).collect()
}

/// Decodes canonical samples into a grid-sized pixel buffer.
#[must_use]
pub fn log_to_image(samples: &[i32], geometry: ImageGeometry) -> FittedPixels {
    let pixels = samples.iter().copied().map(Rgba::unpack).collect();
    fit_pixels(pixels, geometry)
}
