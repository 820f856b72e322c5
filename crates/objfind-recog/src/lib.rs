//! objfind-recog - Object features and labels
//!
//! - [`features`]: the [`Feature`] trait and the geometric features
//!   [`AspectRatio`], [`TopPosition`] and [`BottomPosition`]
//! - [`labels`]: [`LabelSet`], ground-truth labels joined to objects by
//!   their identity key
//!
//! # Examples
//!
//! ```
//! use objfind_core::Pix;
//! use objfind_recog::{AspectRatio, Feature, LabelSet};
//! use objfind_region::find_sorted_objects;
//!
//! // 1 .
//! // 1 .
//! let pix = Pix::from_gray_bytes(2, 2, &[1, 0, 1, 0]).unwrap();
//! let objs = find_sorted_objects(&pix).unwrap();
//! assert_eq!(AspectRatio.describe(&objs, 0), 2.0);
//!
//! let mut labels = LabelSet::new();
//! labels.insert(0, 0, 'l' as u32);
//! assert_eq!(labels.label_for(&objs[0]), Some('l' as u32));
//! ```

pub mod error;
pub mod features;
pub mod labels;

pub use error::{RecogError, RecogResult};
pub use features::{
    AspectRatio, BottomPosition, Feature, TopPosition, default_features, describe_objects,
};
pub use labels::LabelSet;
