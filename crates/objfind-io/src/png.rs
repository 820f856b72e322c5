//! PNG image format support

use crate::{IoError, IoResult};
use objfind_core::{Pix, PixMut, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Grayscale images keep their bit depth (1/2/4/8/16 bpp). Indexed images
/// are expanded through their palette to 32 bpp RGB, as are RGB, RGBA and
/// gray+alpha images.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Vec<u8> = info
        .palette
        .as_ref()
        .map(|p| p.to_vec())
        .unwrap_or_default();

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Two) => (PixelDepth::Bit2, 1),
        (ColorType::Grayscale, BitDepth::Four) => (PixelDepth::Bit4, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Grayscale, BitDepth::Sixteen) => (PixelDepth::Bit16, 1),
        (ColorType::GrayscaleAlpha, _) => (PixelDepth::Bit32, 4),
        (ColorType::Rgb, _) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, _) => (PixelDepth::Bit32, 4),
        (ColorType::Indexed, _) => (PixelDepth::Bit32, 3),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height, pix_depth)?;
    pix_mut.set_spp(spp);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let bits = bit_depth as u32;

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let xs = x as usize;
            let pixel = match color_type {
                ColorType::Grayscale if bits < 8 => unpack_sub_byte(row, x, bits),
                ColorType::Grayscale if bits == 8 => row[xs] as u32,
                ColorType::Grayscale => ((row[xs * 2] as u32) << 8) | row[xs * 2 + 1] as u32,
                ColorType::Indexed => {
                    let index = unpack_sub_byte(row, x, bits) as usize;
                    match palette.get(index * 3..index * 3 + 3) {
                        Some(rgb) => color::compose_rgb(rgb[0], rgb[1], rgb[2]),
                        None => {
                            return Err(IoError::InvalidData(format!(
                                "palette index {} out of range",
                                index
                            )));
                        }
                    }
                }
                ColorType::GrayscaleAlpha => {
                    let step = if bits == 16 { 4 } else { 2 };
                    let g = row[xs * step];
                    color::compose_rgb(g, g, g)
                }
                ColorType::Rgb => {
                    let step = if bits == 16 { 6 } else { 3 };
                    let i = xs * step;
                    let s = step / 3;
                    color::compose_rgb(row[i], row[i + s], row[i + 2 * s])
                }
                ColorType::Rgba => {
                    let step = if bits == 16 { 8 } else { 4 };
                    let i = xs * step;
                    let s = step / 4;
                    color::compose_rgb(row[i], row[i + s], row[i + 2 * s])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Extract a 1/2/4/8-bit sample from a PNG scanline (MSB first).
#[inline]
fn unpack_sub_byte(row: &[u8], x: u32, bits: u32) -> u32 {
    let per_byte = 8 / bits;
    let byte = row[(x / per_byte) as usize] as u32;
    let shift = 8 - bits * (x % per_byte + 1);
    (byte >> shift) & ((1 << bits) - 1)
}

/// Write a PNG image
///
/// 1/2/4/8/16 bpp images are written as grayscale of the same depth;
/// 32 bpp images are written as 8-bit RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One),
        PixelDepth::Bit2 => (ColorType::Grayscale, BitDepth::Two),
        PixelDepth::Bit4 => (ColorType::Grayscale, BitDepth::Four),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bits = pix.depth().bits();
    let bytes_per_row = match pix.depth() {
        PixelDepth::Bit32 => width as usize * 3,
        _ => (width as usize * bits as usize).div_ceil(8),
    };

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let xs = x as usize;
            match pix.depth() {
                PixelDepth::Bit1 | PixelDepth::Bit2 | PixelDepth::Bit4 => {
                    let per_byte = 8 / bits;
                    let shift = 8 - bits * (x % per_byte + 1);
                    row[(x / per_byte) as usize] |= (val as u8) << shift;
                }
                PixelDepth::Bit8 => row[xs] = val as u8,
                PixelDepth::Bit16 => {
                    row[xs * 2] = (val >> 8) as u8;
                    row[xs * 2 + 1] = val as u8;
                }
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[xs * 3] = r;
                    row[xs * 3 + 1] = g;
                    row[xs * 3 + 2] = b;
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = PixMut::new(10, 10, PixelDepth::Bit8).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = PixMut::new(5, 5, PixelDepth::Bit32).unwrap();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_roundtrip_binary() {
        let mut pix_mut = PixMut::new(11, 3, PixelDepth::Bit1).unwrap();
        pix_mut.set_pixel(0, 0, 1).unwrap();
        pix_mut.set_pixel(10, 2, 1).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.depth(), PixelDepth::Bit1);
        assert!(pix2.equals(&pix));
    }
}
