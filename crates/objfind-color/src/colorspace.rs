//! Color space conversion
//!
//! Luminance conversion of packed 32 bpp RGB rasters.

use crate::{ColorError, ColorResult};
use objfind_core::{Pix, PixMut, PixelDepth, color};

/// Default luminance weights (ITU-R BT.601)
pub const RED_WEIGHT: f32 = 0.299;
pub const GREEN_WEIGHT: f32 = 0.587;
pub const BLUE_WEIGHT: f32 = 0.114;

/// Convert one RGB triple to gray with the default weights.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let gray = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32 + 0.5;
    gray.min(255.0) as u8
}

/// Convert 32 bpp RGB to 8 bpp grayscale with custom weights.
///
/// Weights are normalized to sum to 1.0 if they don't already.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] if the image is not 32 bpp and
/// [`ColorError::InvalidParameters`] if a weight is negative or all are zero.
pub fn convert_rgb_to_gray(pix: &Pix, rwt: f32, gwt: f32, bwt: f32) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }
    if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
        return Err(ColorError::InvalidParameters(
            "weights must all be >= 0.0".into(),
        ));
    }
    let sum = rwt + gwt + bwt;
    if sum <= 0.0 {
        return Err(ColorError::InvalidParameters(
            "at least one weight must be positive".into(),
        ));
    }
    let (rwt, gwt, bwt) = (rwt / sum, gwt / sum, bwt / sum);

    let w = pix.width();
    let h = pix.height();
    let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;

    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
            let gray = (rwt * r as f32 + gwt * g as f32 + bwt * b as f32 + 0.5) as u32;
            result.set_pixel_unchecked(x, y, gray.min(255));
        }
    }

    Ok(result.into())
}

/// Convert an image to 8 bpp grayscale.
///
/// 8 bpp input is returned as a shared clone; 32 bpp input is converted
/// with the default luminance weights.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] for any other depth.
pub fn convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => Ok(pix.clone()),
        PixelDepth::Bit32 => convert_rgb_to_gray(pix, RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT),
        d => Err(ColorError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: d.bits(),
        }),
    }
}
