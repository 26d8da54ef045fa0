//! Refinement hierarchy validation.
//!
//! [`validate`](fn@validate) takes a raw option map and returns a
//! [`Verdict`]: either a [`ValidatedHierarchy`] or the first
//! [`HierarchyError`] found. Checks run
//! in a fixed order (unknown options, value types, patch policy, level
//! keys, per-level consistency, cross-level nesting, level count), so the
//! same input always yields the same verdict.
//!
//! Validation is pure: it reads immutable inputs, allocates its result,
//! and has no side effects beyond `tracing` events. Any number of threads
//! may validate concurrently.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hierarchy;
pub mod level;
pub mod validate;
pub mod verdict;

pub use error::HierarchyError;
pub use hierarchy::{MeshLevel, ValidatedHierarchy};
pub use level::Level;
pub use validate::{validate, validate_config};
pub use verdict::Verdict;
