//! Drawing objects back into a raster

use crate::error::{RegionError, RegionResult};
use crate::object::Object;
use objfind_core::PixMut;

/// Paint every run of `obj` with `value`.
///
/// Runs are clipped to the raster; empty runs are skipped.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `value` does not fit the
/// raster depth.
pub fn render_object(pix: &mut PixMut, obj: &Object, value: u32) -> RegionResult<()> {
    let max = pix.depth().max_value();
    if value > max {
        return Err(RegionError::InvalidParameters(format!(
            "value {value} exceeds {max} for {} bpp",
            pix.depth().bits()
        )));
    }
    let (w, h) = (pix.width() as i64, pix.height() as i64);
    for run in &obj.runs {
        let row = run.row as i64;
        if run.is_empty() || row < 0 || row >= h {
            continue;
        }
        let x0 = (run.start as i64).max(0);
        let x1 = (run.end as i64).min(w);
        for x in x0..x1 {
            pix.set_pixel_unchecked(x as u32, row as u32, value);
        }
    }
    Ok(())
}

/// Paint each object with the value chosen by `value_of`.
///
/// Later objects overwrite earlier ones where they overlap.
pub fn render_objects<F>(pix: &mut PixMut, objs: &[Object], mut value_of: F) -> RegionResult<()>
where
    F: FnMut(usize, &Object) -> u32,
{
    for (i, obj) in objs.iter().enumerate() {
        render_object(pix, obj, value_of(i, obj))?;
    }
    Ok(())
}
