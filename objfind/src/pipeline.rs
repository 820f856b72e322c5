//! From a decoded image to sorted objects

use crate::error::ObjFindResult;
use objfind_color::{
    convert_to_gray, equalize_histogram, level_step, pyramid_smooth, quantize_levels,
};
use objfind_core::Pix;
use objfind_region::{Object, find_sorted_objects};

/// Preprocessing options for [`extract_objects`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjFindOptions {
    /// Number of gray levels after quantization, in `1..=256`
    pub levels: u32,
    /// Apply one pyramid reduce/expand round trip
    pub smooth: bool,
    /// Equalize the gray histogram before quantization
    pub equalize: bool,
}

impl Default for ObjFindOptions {
    fn default() -> Self {
        Self {
            levels: 8,
            smooth: true,
            equalize: true,
        }
    }
}

impl ObjFindOptions {
    /// Set the number of quantization levels
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Enable or disable pyramid smoothing
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Enable or disable histogram equalization
    pub fn with_equalize(mut self, equalize: bool) -> Self {
        self.equalize = equalize;
        self
    }
}

/// Turn an 8 or 32 bpp image into the quantized raster that objects are
/// extracted from.
///
/// The stages are gray conversion, optional smoothing, optional
/// equalization and quantization, in that order.
///
/// # Errors
///
/// Returns an error for other depths or for `levels` outside `1..=256`;
/// both are checked before any pixel is touched.
pub fn preprocess(pix: &Pix, options: &ObjFindOptions) -> ObjFindResult<Pix> {
    level_step(options.levels)?;
    let mut gray = convert_to_gray(pix)?;
    if options.smooth {
        gray = pyramid_smooth(&gray)?;
    }
    if options.equalize {
        gray = equalize_histogram(&gray)?;
    }
    Ok(quantize_levels(&gray, options.levels)?)
}

/// Preprocess `pix` and extract its objects sorted by descending area.
///
/// # Examples
///
/// ```
/// use objfind::{ObjFindOptions, Pix, extract_objects};
///
/// // Dark square on a light page
/// let mut bytes = vec![230u8; 64];
/// for y in 2..5 {
///     for x in 2..5 {
///         bytes[y * 8 + x] = 20;
///     }
/// }
/// let pix = Pix::from_gray_bytes(8, 8, &bytes).unwrap();
/// let options = ObjFindOptions::default().with_smooth(false);
/// let objs = extract_objects(&pix, &options).unwrap();
/// assert_eq!(objs.len(), 2);
/// assert_eq!(objs[1].area, 9);
/// ```
pub fn extract_objects(pix: &Pix, options: &ObjFindOptions) -> ObjFindResult<Vec<Object>> {
    let quantized = preprocess(pix, options)?;
    let objs = find_sorted_objects(&quantized)?;
    log::info!(
        "{} objects in {}x{} image ({} levels, smooth={}, equalize={})",
        objs.len(),
        pix.width(),
        pix.height(),
        options.levels,
        options.smooth,
        options.equalize
    );
    Ok(objs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjFindError;
    use objfind_core::{PixMut, PixelDepth, color};

    #[test]
    fn test_default_options() {
        let opts = ObjFindOptions::default();
        assert_eq!(opts.levels, 8);
        assert!(opts.smooth);
        assert!(opts.equalize);

        let opts = opts.with_levels(4).with_smooth(false).with_equalize(false);
        assert_eq!(
            opts,
            ObjFindOptions {
                levels: 4,
                smooth: false,
                equalize: false
            }
        );
    }

    #[test]
    fn test_preprocess_quantizes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let pix = Pix::from_gray_bytes(16, 16, &bytes).unwrap();
        let opts = ObjFindOptions::default()
            .with_smooth(false)
            .with_equalize(false)
            .with_levels(4);
        let q = preprocess(&pix, &opts).unwrap();
        assert_eq!(q.get_pixel(0, 0), Some(0));
        assert_eq!(q.get_pixel(15, 4), Some(64));
        assert_eq!(q.get_pixel(15, 15), Some(192));
    }

    #[test]
    fn test_rgb_input() {
        let mut pm = PixMut::new(6, 2, PixelDepth::Bit32).unwrap();
        for y in 0..2 {
            for x in 0..6 {
                let v = if x < 3 {
                    color::compose_rgb(0, 0, 0)
                } else {
                    color::compose_rgb(255, 255, 255)
                };
                pm.set_pixel_unchecked(x, y, v);
            }
        }
        let pix: Pix = pm.into();
        let opts = ObjFindOptions::default().with_smooth(false);
        let objs = extract_objects(&pix, &opts).unwrap();
        assert_eq!(objs.len(), 2);
        assert_eq!(objs[0].area, 6);
        assert_eq!(objs[0].color, 0);
        assert_eq!(objs[1].color, 224);
    }

    #[test]
    fn test_invalid_levels_rejected_first() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let err = extract_objects(&pix, &ObjFindOptions::default().with_levels(0)).unwrap_err();
        assert!(matches!(err, ObjFindError::Color(_)));
    }

    #[test]
    fn test_empty_image() {
        let pix = Pix::new(0, 0, PixelDepth::Bit8).unwrap();
        assert!(extract_objects(&pix, &ObjFindOptions::default()).unwrap().is_empty());
    }
}
