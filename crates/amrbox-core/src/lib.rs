//! Core types for the amrbox refinement-hierarchy validator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! per-axis index vector used by every box, the integer level identifier,
//! and the [`RejectReason`] taxonomy that every rejection maps onto.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod reason;

pub use id::{Index, IndexVec, LevelNumber, MAX_DIM};
pub use reason::RejectReason;
