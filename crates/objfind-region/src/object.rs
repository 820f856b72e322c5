//! Objects
//!
//! An [`Object`] is one connected group of same-colored runs together with
//! its area and bounding rectangle.

use crate::error::{RegionError, RegionResult};
use crate::graph::RunGraph;
use crate::group::resolve_groups;
use crate::run::{Run, RunFlags};
use objfind_core::{Box, Pix, PixelDepth};
use std::cmp::Ordering;

/// Identity of an object: the position of its first run in raster order.
///
/// No two objects of one extraction share a first run, so the key is
/// unique within a result. Keys order by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    /// Column of the first run's start
    pub x: i32,
    /// Row of the first run
    pub y: i32,
}

impl Ord for ObjectKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for ObjectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A connected same-colored region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    /// Runs in raster order
    pub runs: Vec<Run>,
    /// Number of pixels
    pub area: u64,
    /// Pixel value of every run
    pub color: u8,
    /// Minimal enclosing rectangle
    pub bound: Box,
}

/// Bound before any run has been added. Adding `x + w` gives 0, so the
/// first run replaces it exactly.
const EMPTY_BOUND: Box = Box::new_unchecked(i32::MAX, i32::MAX, -i32::MAX, -i32::MAX);

impl Object {
    /// Create an object without runs.
    pub fn new(color: u8) -> Self {
        Self {
            runs: Vec::new(),
            area: 0,
            color,
            bound: EMPTY_BOUND,
        }
    }

    /// Append a run, growing the area and bound.
    pub fn push_run(&mut self, run: Run) {
        self.area += run.len();
        let b = &mut self.bound;
        let xend = b.right();
        b.x = b.x.min(run.start);
        b.w = xend.max(run.end) - b.x;
        let yend = b.bottom();
        b.y = b.y.min(run.row);
        b.h = yend.max(run.row + 1) - b.y;
        self.runs.push(run);
    }

    /// Identity key, or `None` for an object without runs.
    pub fn key(&self) -> Option<ObjectKey> {
        self.runs.first().map(|r| ObjectKey {
            x: r.start,
            y: r.row,
        })
    }

    /// Check whether the object has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Smallest row holding a run.
    pub fn top_row(&self) -> Option<i32> {
        self.runs.iter().map(|r| r.row).min()
    }

    /// Largest row holding a run.
    pub fn bottom_row(&self) -> Option<i32> {
        self.runs.iter().map(|r| r.row).max()
    }

    /// Check whether the pixel `(x, y)` belongs to one of the runs.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.runs
            .iter()
            .any(|r| r.row == y && r.start <= x && x < r.end)
    }
}

/// Collect the nodes of a resolved graph into objects, one per group.
///
/// Objects appear in the order their first run is met in raster order and
/// keep their runs in raster order. Only the `TOP` and `BOTTOM` markers are
/// carried into the object runs.
///
/// # Panics
///
/// Panics if a node's group is not below `n_groups`.
pub fn assemble_objects(graph: &RunGraph, n_groups: usize) -> Vec<Object> {
    let mut table: Vec<Option<usize>> = vec![None; n_groups];
    let mut objs: Vec<Object> = Vec::with_capacity(n_groups);

    for node in graph.nodes() {
        let slot = &mut table[node.group];
        let idx = *slot.get_or_insert_with(|| {
            objs.push(Object::new(node.color));
            objs.len() - 1
        });
        let mut run = node.run;
        run.flags = node.flags & (RunFlags::TOP | RunFlags::BOTTOM);
        objs[idx].push_run(run);
    }
    objs
}

/// Sort objects by descending area.
///
/// Equal areas are ordered by ascending identity key, so the result does not
/// depend on the input order.
pub fn sort_objects(objs: &mut [Object]) {
    objs.sort_by(|a, b| b.area.cmp(&a.area).then_with(|| a.key().cmp(&b.key())));
}

/// Extract every connected same-valued region of an 8 bpp raster.
///
/// Objects are returned in first-seen raster order. Rasters with zero width
/// or height yield no objects.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] if the raster is not 8 bpp.
///
/// # Examples
///
/// ```
/// use objfind_core::Pix;
/// use objfind_region::find_objects;
///
/// // 1 1 . 1 1
/// // 1 1 1 1 1
/// let pix = Pix::from_gray_bytes(5, 2, &[1, 1, 0, 1, 1, 1, 1, 1, 1, 1]).unwrap();
/// let objs = find_objects(&pix).unwrap();
/// assert_eq!(objs.len(), 2);
/// assert_eq!(objs[0].area, 9);
/// assert_eq!(objs[1].area, 1);
/// ```
pub fn find_objects(pix: &Pix) -> RegionResult<Vec<Object>> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    if pix.is_empty() {
        return Ok(Vec::new());
    }

    let mut graph = RunGraph::build(pix)?;
    let n_groups = resolve_groups(&mut graph);
    let objs = assemble_objects(&graph, n_groups);
    log::debug!(
        "extracted {} objects from {}x{} raster",
        objs.len(),
        pix.width(),
        pix.height()
    );
    Ok(objs)
}

/// [`find_objects`] followed by [`sort_objects`].
pub fn find_sorted_objects(pix: &Pix) -> RegionResult<Vec<Object>> {
    let mut objs = find_objects(pix)?;
    sort_objects(&mut objs);
    Ok(objs)
}
