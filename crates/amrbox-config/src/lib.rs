//! Configuration schema for refinement hierarchies.
//!
//! A hierarchy arrives as a [`RawConfig`]: an insertion-ordered map from
//! option names to loosely typed [`ConfigValue`]s, the shape a simulation
//! front end hands over. [`HierarchyConfig::from_raw`] rejects unknown keys
//! first, then converts every recognized option into an explicit, typed
//! field. [`HierarchyConfig::validate`] checks the scalar patch-size and
//! nesting-buffer invariants and resolves them into a [`PatchPolicy`].
//!
//! Box geometry is not checked here: refinement boxes are parsed into
//! [`RefinementBoxes`] and left for the hierarchy validator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boxspec;
pub mod error;
pub mod options;
pub mod policy;
pub mod value;

pub use boxspec::{BoxEntry, BoxSpec, LevelKey, LevelSpec, RefinementBoxes};
pub use error::ConfigError;
pub use options::{HierarchyConfig, PASSTHROUGH_OPTIONS, RECOGNIZED_OPTIONS};
pub use policy::{ghost_width, PatchPolicy, PatchSizes};
pub use value::{ConfigValue, MapKey, RawConfig};
