//! JPEG image format support
//!
//! Reads baseline and progressive JPEG images with the `jpeg-decoder`
//! crate. Writing is not supported; JPEG is lossy and object extraction
//! results are written as PNG or PNM.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use objfind_core::{Pix, PixMut, PixelDepth, color};
use std::io::Read;

/// Read a JPEG image
///
/// Grayscale images become 8 bpp, RGB images 32 bpp. CMYK and 16-bit
/// lossless images are rejected.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;
    let (width, height) = (info.width as u32, info.height as u32);

    let (depth, spp, channels) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1, 1),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };
    let expected = width as usize * height as usize * channels;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} bytes for {}x{}",
            data.len(),
            width,
            height
        )));
    }

    let mut pix_mut = PixMut::new(width, height, depth)?;
    pix_mut.set_spp(spp);
    if width > 0 {
        let row_len = width as usize * channels;
        for (y, row) in data[..expected].chunks_exact(row_len).enumerate() {
            for (x, px) in row.chunks_exact(channels).enumerate() {
                let val = match px {
                    [r, g, b] => color::compose_rgb(*r, *g, *b),
                    _ => px[0] as u32,
                };
                pix_mut.set_pixel_unchecked(x as u32, y as u32, val);
            }
        }
    }
    Ok(pix_mut.into())
}
