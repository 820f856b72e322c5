//! PIX - The raster container
//!
//! The `Pix` structure is the image type consumed by every objfind stage.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit images, color order is RGBA (red in MSB)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is read-only.
//! Images are built or drawn into through [`PixMut`], then frozen with
//! `Into<Pix>`.
//!
//! # Degenerate rasters
//!
//! A width or height of zero is allowed. Such a raster holds no pixels and
//! yields no objects.

mod access;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale / quantized levels
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 2, 4, 8, 16, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// Binary PNM format (PBM/PGM/PPM)
    Pnm,
    /// JPEG/JFIF format (read only)
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pnm",
            Self::Jpeg => "jpg",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl PixData {
    fn new(width: u32, height: u32, depth: PixelDepth) -> Self {
        let wpl = compute_wpl(width, depth);
        let spp = match depth {
            PixelDepth::Bit32 => 3,
            _ => 1,
        };
        Self {
            width,
            height,
            depth,
            spp,
            wpl,
            data: vec![0u32; (wpl as usize) * (height as usize)],
        }
    }
}

/// Compute words per line for given width and depth.
///
/// # Panics
///
/// Panics if the result would exceed `u32::MAX`.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    let wpl = bits_per_line.div_ceil(32);
    u32::try_from(wpl).unwrap_or_else(|_| {
        panic!(
            "image row too large: width={} depth={:?} requires {} words",
            width, depth, wpl
        )
    })
}

/// PIX - Raster container
///
/// # Examples
///
/// ```
/// use objfind_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero. Zero width or height is
    /// accepted and produces an empty raster.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::new(width, height, depth)),
        })
    }

    /// Create an 8 bpp PIX from row-major byte values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bytes.len() != width * height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use objfind_core::Pix;
    ///
    /// let pix = Pix::from_gray_bytes(3, 2, &[0, 0, 1, 1, 1, 1]).unwrap();
    /// assert_eq!(pix.get_pixel(2, 0), Some(1));
    /// ```
    pub fn from_gray_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if bytes.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "{} bytes given for a {}x{} raster ({} expected)",
                bytes.len(),
                width,
                height,
                expected
            )));
        }
        let mut pix_mut = PixMut::new(width, height, PixelDepth::Bit8)?;
        if width > 0 {
            for (y, row) in bytes.chunks_exact(width as usize).enumerate() {
                let line = pix_mut.row_data_mut(y as u32);
                for (x, &val) in row.iter().enumerate() {
                    set_data_byte(line, x as u32, val as u32);
                }
            }
        }
        Ok(pix_mut.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Check whether the raster holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.width == 0 || self.inner.height == 0
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the packed words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Unpack one row of an 8 bpp image into `out`.
    ///
    /// `out` is cleared first and holds exactly `width` bytes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for anything other than 8 bpp and
    /// [`Error::IndexOutOfBounds`] if `y >= height`.
    pub fn read_gray_row(&self, y: u32, out: &mut Vec<u8>) -> Result<()> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        let line = self.row_data(y);
        out.clear();
        out.extend((0..self.width()).map(|x| get_data_byte(line, x) as u8));
        Ok(())
    }

    /// Check whether two images have the same width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Check whether two images have identical size, depth and pixels.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| self.get_pixel(x, y) == other.get_pixel(x, y))
        })
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable PIX.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::new(width, height, depth),
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Set samples per pixel (3 for RGB, 4 for RGBA at 32 bpp).
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get the packed words of a specific row.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Set every pixel to `val` (masked to the pixel depth).
    pub fn set_all(&mut self, val: u32) {
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            for x in 0..w {
                self.set_pixel_unchecked(x, y, val);
            }
        }
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 50, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 50);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.wpl(), 25);
        assert_eq!(pix.spp(), 1);
        assert!(!pix.is_empty());
    }

    #[test]
    fn test_pix_zero_dimensions() {
        let pix = Pix::new(0, 10, PixelDepth::Bit8).unwrap();
        assert!(pix.is_empty());
        assert_eq!(pix.wpl(), 0);
        assert!(pix.data().is_empty());

        let pix = Pix::new(10, 0, PixelDepth::Bit8).unwrap();
        assert!(pix.is_empty());
    }

    #[test]
    fn test_pixel_depth_from_bits() {
        assert_eq!(PixelDepth::from_bits(8).unwrap(), PixelDepth::Bit8);
        assert!(PixelDepth::from_bits(3).is_err());
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
        assert_eq!(PixelDepth::Bit32.max_value(), u32::MAX);
    }

    #[test]
    fn test_wpl_calculation() {
        assert_eq!(Pix::new(32, 1, PixelDepth::Bit1).unwrap().wpl(), 1);
        assert_eq!(Pix::new(33, 1, PixelDepth::Bit1).unwrap().wpl(), 2);
        assert_eq!(Pix::new(5, 1, PixelDepth::Bit8).unwrap().wpl(), 2);
        assert_eq!(Pix::new(5, 1, PixelDepth::Bit32).unwrap().wpl(), 5);
    }

    #[test]
    fn test_from_gray_bytes() {
        let pix = Pix::from_gray_bytes(3, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(2, 1), Some(6));
        let err = Pix::from_gray_bytes(3, 2, &[1, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("2 bytes given for a 3x2 raster (6 expected)"));
    }

    #[test]
    fn test_read_gray_row() {
        let pix = Pix::from_gray_bytes(5, 2, &[9, 9, 7, 7, 7, 0, 1, 2, 3, 4]).unwrap();
        let mut row = Vec::new();
        pix.read_gray_row(1, &mut row).unwrap();
        assert_eq!(row, vec![0, 1, 2, 3, 4]);
        assert!(pix.read_gray_row(2, &mut row).is_err());

        let rgb = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(rgb.read_gray_row(0, &mut row).is_err());
    }

    #[test]
    fn test_mut_freezes_into_pix() {
        let mut pm = PixMut::new(4, 4, PixelDepth::Bit8).unwrap();
        pm.set_all(17);
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(3, 3), Some(17));
        let shared = pix.clone();
        assert!(shared.equals(&pix));
    }

    #[test]
    fn test_equals() {
        let a = Pix::from_gray_bytes(2, 2, &[1, 2, 3, 4]).unwrap();
        let b = Pix::from_gray_bytes(2, 2, &[1, 2, 3, 4]).unwrap();
        let c = Pix::from_gray_bytes(2, 2, &[1, 2, 3, 5]).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(!a.equals(&Pix::from_gray_bytes(4, 1, &[1, 2, 3, 4]).unwrap()));
    }
}
