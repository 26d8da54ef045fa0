//! Integer index geometry for refinement hierarchies.
//!
//! This crate defines [`IndexBox`], the closed axis-aligned hyperrectangle
//! every refinement level is built from, together with the predicates the
//! validator needs over collections of boxes and the deterministic patch
//! tiling applied to accepted levels.
//!
//! # Modules
//!
//! - [`index_box`]: the box value type and its per-pair predicates
//! - [`boxset`]: overlap search, extent, and nesting lookups over box slices
//! - [`tiling`]: splitting a box into patches under a patch-size policy

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boxset;
pub mod error;
pub mod index_box;
pub mod tiling;

pub use error::BoxError;
pub use index_box::IndexBox;
pub use tiling::{tile_box, tile_boxes};
