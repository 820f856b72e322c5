//! objfind-region - Run-length object extraction
//!
//! Finds the connected same-valued regions ("objects") of a quantized 8 bpp
//! raster. Connectivity is 4-way: two pixels belong together when they have
//! the same value and are horizontal neighbors, or sit in vertically
//! overlapping runs on consecutive rows.
//!
//! The stages are:
//!
//! 1. [`extract_row_runs`] splits each row into maximal same-value runs
//! 2. [`RunGraph::build`] links each run to the overlapping same-valued runs
//!    of the row above
//! 3. [`resolve_groups`] partitions the graph into connected groups
//! 4. [`assemble_objects`] turns each group into an [`Object`]
//! 5. [`sort_objects`] orders objects by descending area
//!
//! [`find_objects`] and [`find_sorted_objects`] run the whole chain.
//! [`fill_gaps`] and [`render_object`] operate on finished objects.
//!
//! # Examples
//!
//! ```
//! use objfind_core::{Box, Pix};
//! use objfind_region::find_sorted_objects;
//!
//! // 3 3 . .
//! // 3 3 . 7
//! let pix = Pix::from_gray_bytes(4, 2, &[3, 3, 0, 0, 3, 3, 0, 7]).unwrap();
//! let objs = find_sorted_objects(&pix).unwrap();
//! assert_eq!(objs.len(), 3);
//! assert_eq!(objs[0].area, 4);
//! assert_eq!(objs[0].bound, Box::new_unchecked(0, 0, 2, 2));
//! assert_eq!(objs[2].color, 7);
//! ```

pub mod error;
pub mod gapfill;
pub mod graph;
pub mod group;
pub mod object;
pub mod render;
pub mod run;

// Re-export core types
pub use objfind_core;

pub use error::{RegionError, RegionResult};
pub use gapfill::fill_gaps;
pub use graph::{RunGraph, RunNode};
pub use group::resolve_groups;
pub use object::{
    Object, ObjectKey, assemble_objects, find_objects, find_sorted_objects, sort_objects,
};
pub use render::{render_object, render_objects};
pub use run::{Run, RunFlags, extract_row_runs};
