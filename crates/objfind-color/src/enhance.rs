//! Histogram equalization
//!
//! Spreads the gray levels of an 8 bpp image so that the cumulative
//! distribution becomes approximately linear. The darkest occupied level
//! maps to 0 and the brightest to 255.

use crate::{ColorResult, require_gray};
use objfind_core::{Pix, PixMut};

/// 256-entry gray value mapping
pub type TrcLut = [u8; 256];

/// Compute the 256-bin histogram of an 8 bpp image.
pub fn gray_histogram(pix: &Pix) -> ColorResult<[u32; 256]> {
    require_gray(pix)?;
    let mut hist = [0u32; 256];
    let mut row = Vec::with_capacity(pix.width() as usize);
    for y in 0..pix.height() {
        pix.read_gray_row(y, &mut row)?;
        for &v in &row {
            hist[v as usize] += 1;
        }
    }
    Ok(hist)
}

/// Build the equalization lookup table for a histogram.
///
/// The first occupied bin maps to 0; every following bin maps to
/// `round(255 * (cdf(i) - hist[first]) / (total - hist[first]))`.
/// An empty or single-valued histogram yields a table that is identity for
/// empty input and constant at the occupied level otherwise.
pub fn equalize_lut(hist: &[u32; 256]) -> TrcLut {
    let mut lut = [0u8; 256];
    let total: u64 = hist.iter().map(|&c| c as u64).sum();

    let Some(first) = hist.iter().position(|&c| c > 0) else {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    };

    let first_count = hist[first] as u64;
    if first_count == total {
        lut.fill(first as u8);
        return lut;
    }

    let scale = 255.0 / (total - first_count) as f64;
    let mut cumul = 0u64;
    for i in (first + 1)..256 {
        cumul += hist[i] as u64;
        lut[i] = ((cumul as f64 * scale).round() as i64).clamp(0, 255) as u8;
    }
    lut
}

/// Equalize the histogram of an 8 bpp image.
///
/// # Errors
///
/// Returns [`crate::ColorError::UnsupportedDepth`] if the image is not 8 bpp.
pub fn equalize_histogram(pix: &Pix) -> ColorResult<Pix> {
    let hist = gray_histogram(pix)?;
    let lut = equalize_lut(&hist);

    let w = pix.width();
    let h = pix.height();
    let mut result = PixMut::new(w, h, pix.depth())?;
    for y in 0..h {
        for x in 0..w {
            let v = pix.get_pixel_unchecked(x, y) as usize;
            result.set_pixel_unchecked(x, y, lut[v] as u32);
        }
    }
    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use objfind_core::PixelDepth;

    #[test]
    fn test_histogram() {
        let pix = Pix::from_gray_bytes(3, 2, &[0, 0, 5, 5, 5, 255]).unwrap();
        let hist = gray_histogram(&pix).unwrap();
        assert_eq!(hist[0], 2);
        assert_eq!(hist[5], 3);
        assert_eq!(hist[255], 1);
        assert_eq!(hist.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_equalize_spreads_range() {
        let pix = Pix::from_gray_bytes(4, 1, &[100, 101, 102, 103]).unwrap();
        let eq = equalize_histogram(&pix).unwrap();
        assert_eq!(eq.get_pixel(0, 0), Some(0));
        assert_eq!(eq.get_pixel(1, 0), Some(85));
        assert_eq!(eq.get_pixel(2, 0), Some(170));
        assert_eq!(eq.get_pixel(3, 0), Some(255));
    }

    #[test]
    fn test_equalize_constant_image() {
        let pix = Pix::from_gray_bytes(2, 2, &[77; 4]).unwrap();
        let eq = equalize_histogram(&pix).unwrap();
        assert_eq!(eq.get_pixel(1, 1), Some(77));
    }

    #[test]
    fn test_equalize_lut_is_monotonic() {
        let mut hist = [0u32; 256];
        for (i, h) in hist.iter_mut().enumerate() {
            *h = (i as u32 * 7) % 13;
        }
        let lut = equalize_lut(&hist);
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_equalize_requires_gray() {
        let rgb = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(equalize_histogram(&rgb).is_err());
    }

    #[test]
    fn test_empty_histogram_identity() {
        let lut = equalize_lut(&[0u32; 256]);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[200], 200);
    }
}
