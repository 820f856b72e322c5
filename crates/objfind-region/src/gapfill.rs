//! Row gap filling
//!
//! Collapses an object to exactly one run per row between its top and
//! bottom rows. A row holding several runs gets their union extent; a row
//! holding none gets an empty placeholder run.

use crate::object::Object;
use crate::run::{Run, RunFlags};

/// Placeholder for a row without source runs.
fn empty_row(row: i32) -> Run {
    Run {
        row,
        start: i32::MAX,
        end: 0,
        flags: RunFlags::TOP | RunFlags::BOTTOM,
    }
}

/// Build a copy of `src` with one run per row.
///
/// For every row from the first to the last source run, the output run spans
/// from the smallest start to the largest end of the source runs on that row
/// and keeps only the markers shared by all of them. Rows without source runs
/// get a run with `start = i32::MAX`, `end = 0` and both `TOP` and `BOTTOM`
/// set, covering no pixels. The area is the total length of the output runs;
/// color and bound are copied unchanged.
///
/// Applying this to its own output returns an equal object.
///
/// ```
/// use objfind_core::Pix;
/// use objfind_region::{fill_gaps, find_objects};
///
/// // A "U": two runs on the first row, one on the second.
/// let pix = Pix::from_gray_bytes(3, 2, &[1, 0, 1, 1, 1, 1]).unwrap();
/// let u = find_objects(&pix).unwrap().remove(0);
/// let filled = fill_gaps(&u);
/// assert_eq!(filled.runs.len(), 2);
/// assert_eq!((filled.runs[0].start, filled.runs[0].end), (0, 3));
/// assert_eq!(filled.area, 6);
/// ```
pub fn fill_gaps(src: &Object) -> Object {
    let mut dst = Object {
        runs: Vec::new(),
        area: 0,
        color: src.color,
        bound: src.bound,
    };
    let (Some(top), Some(bottom)) = (src.top_row(), src.bottom_row()) else {
        return dst;
    };

    dst.runs = (top..=bottom).map(empty_row).collect();
    let mut seen = vec![false; dst.runs.len()];
    for sr in &src.runs {
        let i = (sr.row - top) as usize;
        let dr = &mut dst.runs[i];
        if seen[i] {
            dst.area -= dr.len();
        }
        dr.start = dr.start.min(sr.start);
        dr.end = dr.end.max(sr.end);
        dr.flags &= sr.flags;
        dst.area += dr.len();
        seen[i] = true;
    }
    dst
}
