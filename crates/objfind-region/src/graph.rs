//! Run adjacency graph
//!
//! Every run of the raster becomes a [`RunNode`] in an arena indexed by
//! `usize`, in raster order (row by row, left to right). A node records the
//! indices of the same-colored runs on the row directly above that share at
//! least one column with it. Only vertical overlap connects: runs that merely
//! touch at a corner or an edge end are separate.

use crate::error::{RegionError, RegionResult};
use crate::run::{Run, RunFlags, extract_row_runs};
use objfind_core::{Pix, PixelDepth};

/// A run plus its graph bookkeeping
#[derive(Debug, Clone)]
pub struct RunNode {
    /// Run geometry
    pub run: Run,
    /// Pixel value shared by the whole run
    pub color: u8,
    /// Indices of overlapping same-colored runs on the previous row
    pub adjacent: Vec<usize>,
    /// Group id, valid once `flags` contains [`RunFlags::GROUPED`]
    pub group: usize,
    /// Markers
    pub flags: RunFlags,
}

/// Arena of run nodes in raster order
#[derive(Debug, Clone, Default)]
pub struct RunGraph {
    nodes: Vec<RunNode>,
    edges: usize,
}

impl RunGraph {
    /// Build the run graph of an 8 bpp raster.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnsupportedDepth`] if the raster is not 8 bpp.
    pub fn build(pix: &Pix) -> RegionResult<Self> {
        if pix.depth() != PixelDepth::Bit8 {
            return Err(RegionError::UnsupportedDepth {
                expected: "8 bpp",
                actual: pix.depth().bits(),
            });
        }

        let mut graph = RunGraph::default();
        let mut row = Vec::with_capacity(pix.width() as usize);
        let mut last_row: Vec<usize> = Vec::new();
        let mut cur_row: Vec<usize> = Vec::new();

        for y in 0..pix.height() {
            pix.read_gray_row(y, &mut row)?;
            for (run, color) in extract_row_runs(&row, y as i32) {
                cur_row.push(graph.connect(run, color, &last_row));
            }
            std::mem::swap(&mut last_row, &mut cur_row);
            cur_row.clear();
        }

        log::debug!(
            "run graph: {} runs, {} adjacencies over {} rows",
            graph.nodes.len(),
            graph.edges,
            pix.height()
        );
        Ok(graph)
    }

    /// Append a node for `run` and link it to the overlapping same-colored
    /// runs among `last_row`, which must all lie on the row above.
    ///
    /// # Panics
    ///
    /// Panics if a node of `last_row` is not on row `run.row - 1`.
    fn connect(&mut self, run: Run, color: u8, last_row: &[usize]) -> usize {
        let mut adjacent = Vec::new();
        for &idx in last_row {
            let other = &self.nodes[idx];
            assert_eq!(
                other.run.row,
                run.row - 1,
                "run graph row bookkeeping is inconsistent"
            );
            if other.color == color && run.overlaps(&other.run) {
                adjacent.push(idx);
            }
        }
        self.edges += adjacent.len();
        self.nodes.push(RunNode {
            run,
            color,
            adjacent,
            group: 0,
            flags: RunFlags::NONE,
        });
        self.nodes.len() - 1
    }

    /// Nodes in raster order.
    pub fn nodes(&self) -> &[RunNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [RunNode] {
        &mut self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of recorded adjacencies.
    pub fn edge_count(&self) -> usize {
        self.edges
    }
}
