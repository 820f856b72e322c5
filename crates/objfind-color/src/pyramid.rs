//! Gaussian pyramid smoothing
//!
//! One reduce/expand round trip with the separable 5-tap binomial kernel
//! `[1, 4, 6, 4, 1] / 16`. The result has the source size and is a
//! low-pass version of it, which removes single-pixel noise before
//! quantization breaks the raster into level regions.
//!
//! Borders are handled by reflection without repeating the edge sample
//! (`dcb|abcd|cba`).

use crate::{ColorResult, require_gray};
use objfind_core::{Pix, PixMut, PixelDepth};

const KERNEL: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];

/// Reflect an out-of-range index back into `0..n`.
#[inline]
fn reflect(mut i: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

/// Float plane used between the passes.
struct Plane {
    w: usize,
    h: usize,
    data: Vec<f32>,
}

impl Plane {
    fn from_pix(pix: &Pix) -> ColorResult<Self> {
        let (w, h) = (pix.width() as usize, pix.height() as usize);
        let mut data = Vec::with_capacity(w * h);
        let mut row = Vec::with_capacity(w);
        for y in 0..pix.height() {
            pix.read_gray_row(y, &mut row)?;
            data.extend(row.iter().map(|&v| v as f32));
        }
        Ok(Self { w, h, data })
    }

    fn to_pix(&self) -> ColorResult<Pix> {
        let mut out = PixMut::new(self.w as u32, self.h as u32, PixelDepth::Bit8)?;
        for y in 0..self.h {
            for x in 0..self.w {
                let v = self.data[y * self.w + x].round().clamp(0.0, 255.0) as u32;
                out.set_pixel_unchecked(x as u32, y as u32, v);
            }
        }
        Ok(out.into())
    }

    /// Blur along x and keep every second column.
    fn reduce_x(&self) -> Plane {
        let w2 = self.w.div_ceil(2);
        let mut data = vec![0.0; w2 * self.h];
        for y in 0..self.h {
            let src = &self.data[y * self.w..(y + 1) * self.w];
            for x2 in 0..w2 {
                let c = 2 * x2 as i64;
                data[y * w2 + x2] = KERNEL
                    .iter()
                    .enumerate()
                    .map(|(k, wt)| wt * src[reflect(c + k as i64 - 2, self.w as i64)])
                    .sum();
            }
        }
        Plane { w: w2, h: self.h, data }
    }

    /// Upsample along x to `w_out` by zero insertion, then blur.
    ///
    /// Each output is normalized by the kernel weight that landed on source
    /// samples, which is 1/2 everywhere except for a one-sample output.
    fn expand_x(&self, w_out: usize) -> Plane {
        let mut data = vec![0.0; w_out * self.h];
        for y in 0..self.h {
            let src = &self.data[y * self.w..(y + 1) * self.w];
            for x in 0..w_out {
                let mut acc = 0.0;
                let mut wsum = 0.0;
                for (k, wt) in KERNEL.iter().enumerate() {
                    let u = reflect(x as i64 + k as i64 - 2, w_out as i64);
                    if u % 2 == 0 {
                        acc += wt * src[(u / 2).min(self.w - 1)];
                        wsum += wt;
                    }
                }
                data[y * w_out + x] = acc / wsum;
            }
        }
        Plane { w: w_out, h: self.h, data }
    }

    fn transpose(&self) -> Plane {
        let mut data = vec![0.0; self.w * self.h];
        for y in 0..self.h {
            for x in 0..self.w {
                data[x * self.h + y] = self.data[y * self.w + x];
            }
        }
        Plane {
            w: self.h,
            h: self.w,
            data,
        }
    }

    fn reduce(&self) -> Plane {
        self.reduce_x().transpose().reduce_x().transpose()
    }

    fn expand(&self, w_out: usize, h_out: usize) -> Plane {
        self.expand_x(w_out).transpose().expand_x(h_out).transpose()
    }
}

/// Blur and downsample an 8 bpp image by 2 in each direction.
///
/// The output size is `ceil(w / 2) x ceil(h / 2)`.
pub fn pyramid_reduce(pix: &Pix) -> ColorResult<Pix> {
    require_gray(pix)?;
    if pix.is_empty() {
        return Ok(pix.clone());
    }
    Plane::from_pix(pix)?.reduce().to_pix()
}

/// Upsample an 8 bpp image to `width x height` and blur it.
///
/// `width` and `height` must lie in `2*w - 1 ..= 2*w` (and likewise for
/// the height) so that every output pixel has source support.
pub fn pyramid_expand(pix: &Pix, width: u32, height: u32) -> ColorResult<Pix> {
    require_gray(pix)?;
    let ok = |out: u32, src: u32| src > 0 && out <= 2 * src && out + 1 >= 2 * src;
    if !ok(width, pix.width()) || !ok(height, pix.height()) {
        return Err(crate::ColorError::InvalidParameters(format!(
            "cannot expand {}x{} to {}x{}",
            pix.width(),
            pix.height(),
            width,
            height
        )));
    }
    Plane::from_pix(pix)?
        .expand(width as usize, height as usize)
        .to_pix()
}

/// Smooth an 8 bpp image by one pyramid reduce/expand round trip.
///
/// The output has the same size as the input. Empty rasters are returned
/// unchanged.
pub fn pyramid_smooth(pix: &Pix) -> ColorResult<Pix> {
    require_gray(pix)?;
    if pix.is_empty() {
        return Ok(pix.clone());
    }
    let plane = Plane::from_pix(pix)?;
    plane.reduce().expand(plane.w, plane.h).to_pix()
}
