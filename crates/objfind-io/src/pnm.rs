//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary, maxval <= 255), and
//! PPM (P6 binary, maxval <= 255) formats. ASCII variants are rejected.

use crate::{IoError, IoResult};
use objfind_core::{Pix, PixMut, PixelDepth, color};
use std::io::{BufRead, Write};

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 bpp (PGM), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;
    let kind = match &magic {
        b"P4" => 4,
        b"P5" => 5,
        b"P6" => 6,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM magic {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }
    };

    let width = read_header_value(&mut reader)?;
    let height = read_header_value(&mut reader)?;
    let maxval = if kind == 4 {
        1
    } else {
        read_header_value(&mut reader)?
    };
    if maxval == 0 || maxval > 255 {
        return Err(IoError::InvalidData(format!(
            "unsupported PNM maxval {}",
            maxval
        )));
    }

    let (depth, bytes_per_row) = match kind {
        4 => (PixelDepth::Bit1, (width as usize).div_ceil(8)),
        5 => (PixelDepth::Bit8, width as usize),
        _ => (PixelDepth::Bit32, width as usize * 3),
    };

    let mut pix_mut = PixMut::new(width, height, depth)?;
    let mut row = vec![0u8; bytes_per_row];
    for y in 0..height {
        reader.read_exact(&mut row)?;
        for x in 0..width {
            let xs = x as usize;
            let val = match kind {
                4 => ((row[xs / 8] >> (7 - (xs % 8))) & 1) as u32,
                5 => row[xs] as u32,
                _ => color::compose_rgb(row[xs * 3], row[xs * 3 + 1], row[xs * 3 + 2]),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Parse one decimal header field, skipping whitespace and `#` comments.
///
/// Consumes exactly one whitespace byte after the number, as required
/// before the raster data.
fn read_header_value<R: BufRead>(reader: &mut R) -> IoResult<u32> {
    let mut byte = [0u8; 1];
    let mut value: Option<u32> = None;
    let mut in_comment = false;

    loop {
        if reader.read(&mut byte)? == 0 {
            return value
                .ok_or_else(|| IoError::InvalidData("truncated PNM header".to_string()));
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n' && c != b'\r';
            continue;
        }
        match c {
            b'#' if value.is_none() => in_comment = true,
            b'0'..=b'9' => {
                let digit = (c - b'0') as u32;
                let next = value
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| IoError::InvalidData("PNM header value overflow".into()))?;
                value = Some(next);
            }
            c if c.is_ascii_whitespace() => {
                if let Some(v) = value {
                    return Ok(v);
                }
            }
            _ => {
                return Err(IoError::InvalidData(format!(
                    "unexpected byte 0x{:02x} in PNM header",
                    c
                )));
            }
        }
    }
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (magic, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => ("P4", (width as usize).div_ceil(8)),
        PixelDepth::Bit8 => ("P5", width as usize),
        PixelDepth::Bit32 => ("P6", width as usize * 3),
        d => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM output does not support {} bpp",
                d.bits()
            )));
        }
    };

    write!(writer, "{}\n{} {}\n", magic, width, height)?;
    if pix.depth() != PixelDepth::Bit1 {
        writeln!(writer, "255")?;
    }

    let mut row = vec![0u8; bytes_per_row];
    for y in 0..height {
        row.fill(0);
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let xs = x as usize;
            match pix.depth() {
                PixelDepth::Bit1 => row[xs / 8] |= ((val & 1) as u8) << (7 - (xs % 8)),
                PixelDepth::Bit8 => row[xs] = val as u8,
                _ => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[xs * 3..xs * 3 + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
        writer.write_all(&row)?;
    }

    Ok(())
}
