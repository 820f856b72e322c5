//! objfind-color - Raster preprocessing for object extraction
//!
//! Turns a decoded image into a quantized single-channel raster:
//!
//! - **Gray conversion** ([`colorspace`]): 32 bpp RGB to 8 bpp luminance
//! - **Pyramid smoothing** ([`pyramid`]): Gaussian reduce then expand
//! - **Histogram equalization** ([`enhance`])
//! - **Level quantization** ([`quantize`]): collapse 256 gray values to `k` levels
//!
//! # Example
//!
//! ```
//! use objfind_color::{equalize_histogram, quantize_levels};
//! use objfind_core::Pix;
//!
//! let pix = Pix::from_gray_bytes(4, 1, &[10, 20, 200, 250]).unwrap();
//! let eq = equalize_histogram(&pix).unwrap();
//! let q = quantize_levels(&eq, 2).unwrap();
//! assert_eq!(q.get_pixel(0, 0), Some(0));
//! assert_eq!(q.get_pixel(3, 0), Some(128));
//! ```

pub mod colorspace;
pub mod enhance;
pub mod error;
pub mod pyramid;
pub mod quantize;

// Re-export core types
pub use objfind_core;

pub use colorspace::{convert_rgb_to_gray, convert_to_gray, rgb_to_gray};
pub use enhance::{equalize_histogram, equalize_lut, gray_histogram};
pub use error::{ColorError, ColorResult};
pub use pyramid::{pyramid_expand, pyramid_reduce, pyramid_smooth};
pub use quantize::{level_step, quantize_levels};

/// Check that `pix` is an 8 bpp raster.
pub(crate) fn require_gray(pix: &objfind_core::Pix) -> ColorResult<()> {
    if pix.depth() != objfind_core::PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
