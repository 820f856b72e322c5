//! objfind-test - Regression harness for the objfind crates
//!
//! A `*_reg.rs` test creates a [`RegParams`], runs a sequence of numbered
//! checks against it and finally asserts [`RegParams::cleanup`]. Three modes
//! are selected with the `REGTEST_MODE` environment variable:
//!
//! - **compare** (default): value and raster checks, output files are
//!   compared with their golden copies
//! - **generate**: output files are copied to the golden directory
//! - **display**: checks run, output files are written but not compared
//!
//! # Usage
//!
//! ```ignore
//! use objfind_test::{RegParams, raster_from_rows};
//!
//! let pix = raster_from_rows(&["11.", ".11"]).unwrap();
//! let mut rp = RegParams::new("merge");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use objfind_core::Pix;

fn workspace_root() -> String {
    // crates/objfind-test
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Directory holding golden output files.
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Directory receiving output files of the current run.
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build an 8 bpp raster from a picture drawn with characters.
///
/// Each string is one row. `.` and space are level 0; a digit `d` is level
/// `d`; a letter is level `10 + (c - 'a')` (case-insensitive). All rows must
/// have the same length.
///
/// ```
/// let pix = objfind_test::raster_from_rows(&["1.2", "1.2"]).unwrap();
/// assert_eq!(pix.get_pixel(2, 1), Some(2));
/// ```
pub fn raster_from_rows(rows: &[&str]) -> TestResult<Pix> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut bytes = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(TestError::InvalidRaster(format!(
                "row {y} has {} columns, expected {width}",
                row.chars().count()
            )));
        }
        for c in row.chars() {
            let level = match c {
                '.' | ' ' => 0,
                '0'..='9' => c as u8 - b'0',
                'a'..='z' => 10 + (c as u8 - b'a'),
                'A'..='Z' => 10 + (c as u8 - b'A'),
                _ => {
                    return Err(TestError::InvalidRaster(format!(
                        "unexpected character {c:?} in row {y}"
                    )));
                }
            };
            bytes.push(level);
        }
    }
    Ok(Pix::from_gray_bytes(width as u32, rows.len() as u32, &bytes)?)
}
