//! Regression test state and checks

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use objfind_core::{ImageFormat, Pix};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Copy output files to the golden directory
    Generate,
    /// Compare output files with golden files (default)
    #[default]
    Compare,
    /// Write output files without comparing them
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`.
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test.
///
/// Every check advances a 1-based index that is used in failure reports
/// and output file names, so a failing check can be located by number.
pub struct RegParams {
    /// Name of the test (e.g., "objfind")
    pub test_name: String,
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test named `test_name`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!("==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Index of the last check.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode.
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, what: String) {
        let msg = format!("Failure in {}_reg, index {}: {}", self.test_name, self.index, what);
        eprintln!("{}", msg);
        self.failures.push(msg);
    }

    /// Compare two values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "expected {expected}, got {actual} (difference {diff}, allowed {delta})"
            ));
            return false;
        }
        true
    }

    /// Compare two rasters for identical size, depth and pixels.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        self.index += 1;
        if !expected.sizes_equal(actual) {
            self.fail(format!(
                "raster size {}x{}x{} differs from {}x{}x{}",
                actual.width(),
                actual.height(),
                actual.depth().bits(),
                expected.width(),
                expected.height(),
                expected.depth().bits()
            ));
            return false;
        }
        for y in 0..expected.height() {
            for x in 0..expected.width() {
                let (e, a) = (expected.get_pixel(x, y), actual.get_pixel(x, y));
                if e != a {
                    self.fail(format!("pixel ({x}, {y}) is {a:?}, expected {e:?}"));
                    return false;
                }
            }
        }
        true
    }

    /// Compare two strings, typically textual dumps of results.
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if expected != actual {
            self.fail(format!("strings differ\nexpected:\n{expected}\nactual:\n{actual}"));
            return false;
        }
        true
    }

    /// Write `pix` to the regout directory and check it against its golden
    /// copy according to the mode.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );
        objfind_io::write_image(pix, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            format.extension()
        );
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(&local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!("golden file not found: {golden_path}"));
                } else if !same_image(&local_path, &golden_path) {
                    self.fail(format!("{local_path} differs from {golden_path}"));
                }
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Report the outcome. Returns `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
            return true;
        }
        eprintln!("FAILURE: {}_reg", self.test_name);
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        false
    }

    /// Check if all checks have passed so far.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Recorded failure messages.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Byte-equal files, or files that decode to the same raster.
fn same_image(path1: &str, path2: &str) -> bool {
    if let (Ok(a), Ok(b)) = (fs::read(path1), fs::read(path2))
        && a == b
    {
        return true;
    }
    match (objfind_io::read_image(path1), objfind_io::read_image(path2)) {
        (Ok(a), Ok(b)) => a.equals(&b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix_and_strings() {
        let a = Pix::from_gray_bytes(2, 1, &[1, 2]).unwrap();
        let b = Pix::from_gray_bytes(2, 1, &[1, 3]).unwrap();
        let mut rp = RegParams::new("params_pix");
        assert!(rp.compare_pix(&a, &a.clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(rp.compare_strings("x", "x"));
        assert!(!rp.compare_strings("x", "y"));
        assert_eq!(rp.failures().len(), 2);
    }
}
