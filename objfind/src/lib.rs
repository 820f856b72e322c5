//! objfind - Monochrome object extraction from raster images
//!
//! Quantizes an image to a few gray levels and splits it into connected
//! regions of equal level. Each [`Object`] carries its runs, area, level and
//! bounding box.
//!
//! # Example
//!
//! ```
//! use objfind::{ObjFindOptions, Pix, extract_objects};
//!
//! let pix = Pix::from_gray_bytes(4, 1, &[0, 0, 255, 255]).unwrap();
//! let options = ObjFindOptions::default().with_smooth(false).with_levels(2);
//! let objs = extract_objects(&pix, &options).unwrap();
//! assert_eq!(objs.len(), 2);
//! ```

mod error;
mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use objfind_core::*;

// Re-export domain crates as modules
pub use objfind_color as color;
pub use objfind_io as io;
pub use objfind_recog as recog;
pub use objfind_region as region;

pub use error::{ObjFindError, ObjFindResult};
pub use objfind_region::{Object, ObjectKey, Run, RunFlags};
pub use pipeline::{ObjFindOptions, extract_objects, preprocess};
