//! Gray level quantization
//!
//! Collapses the 256 gray values of an 8 bpp image onto `levels` evenly
//! spaced values: `v' = (v / step) * step` with `step = 256 / levels`.
//! Every output value is the lower edge of its bin, so level 0 stays 0.

use crate::{ColorError, ColorResult, require_gray};
use objfind_core::{Pix, PixMut};

/// Bin width for `levels` quantization levels.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `1 <= levels <= 256`.
pub fn level_step(levels: u32) -> ColorResult<u32> {
    if !(1..=256).contains(&levels) {
        return Err(ColorError::InvalidParameters(format!(
            "levels must be in 1..=256, got {levels}"
        )));
    }
    Ok(256 / levels)
}

/// Quantize an 8 bpp image to `levels` gray levels.
///
/// When 256 is not a multiple of `levels` the top bin absorbs the
/// remainder, so the image may hold `levels + 1` distinct values.
pub fn quantize_levels(pix: &Pix, levels: u32) -> ColorResult<Pix> {
    require_gray(pix)?;
    let step = level_step(levels)?;

    let mut lut = [0u32; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        *entry = (v as u32 / step) * step;
    }

    let (w, h) = (pix.width(), pix.height());
    let mut out = PixMut::new(w, h, pix.depth())?;
    for y in 0..h {
        for x in 0..w {
            let v = pix.get_pixel_unchecked(x, y) as usize;
            out.set_pixel_unchecked(x, y, lut[v]);
        }
    }
    Ok(out.into())
}
