//! amrbox: pre-flight validation of adaptive mesh refinement box hierarchies.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all amrbox sub-crates. For most users, adding `amrbox` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use amrbox::prelude::*;
//!
//! // Two refinement levels on a 65-cell line. L1 boxes are given in the
//! // index space of the once-refined mesh.
//! let raw = RawConfig::new()
//!     .with("cells", 65)
//!     .with("nesting_buffer", 1)
//!     .with(
//!         "refinement_boxes",
//!         ConfigValue::map([
//!             ("L0", vec![IndexBox::span(5, 25).unwrap()]),
//!             ("L1", vec![IndexBox::span(11, 49).unwrap()]),
//!         ]),
//!     );
//!
//! match validate(&raw) {
//!     Verdict::Accept(hierarchy) => {
//!         assert_eq!(hierarchy.mesh_level_count(), 3);
//!         let patches: usize = hierarchy
//!             .mesh_levels()
//!             .iter()
//!             .map(|level| level.patches.len())
//!             .sum();
//!         assert!(patches >= 3);
//!     }
//!     Verdict::Reject(err) => panic!("rejected: {err}"),
//! }
//!
//! // A wider buffer pushes the L1 box against its parent's faces.
//! let raw = raw.with("nesting_buffer", 2);
//! assert_eq!(validate(&raw).reason(), Some(RejectReason::NotNestedInParent));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `amrbox-core` | Index types, level numbers, reject reasons |
//! | [`geom`] | `amrbox-geom` | Index boxes, box-set predicates, patch tiling |
//! | [`config`] | `amrbox-config` | Raw and typed configuration, patch policy |
//! | [`hierarchy`] | `amrbox-hierarchy` | Levels, validation, verdicts |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index types, level numbers, and rejection reasons (`amrbox-core`).
pub use amrbox_core as types;

/// Index boxes and box-set geometry (`amrbox-geom`).
///
/// [`geom::IndexBox`] is the closed integer box every other module works
/// with; [`geom::tile_box`] cuts accepted levels into patches.
pub use amrbox_geom as geom;

/// Configuration schema (`amrbox-config`).
///
/// [`config::RawConfig`] is what a front end hands over;
/// [`config::HierarchyConfig`] is its typed form.
pub use amrbox_config as config;

/// Hierarchy validation (`amrbox-hierarchy`).
///
/// [`hierarchy::validate()`] is the entry point; it returns a
/// [`hierarchy::Verdict`].
pub use amrbox_hierarchy as hierarchy;

/// Common imports for typical amrbox usage.
///
/// ```rust
/// use amrbox::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use amrbox_core::{Index, LevelNumber, RejectReason};

    // Geometry
    pub use amrbox_geom::IndexBox;

    // Configuration
    pub use amrbox_config::{ConfigError, ConfigValue, HierarchyConfig, RawConfig, RefinementBoxes};

    // Validation
    pub use amrbox_hierarchy::{
        validate, validate_config, HierarchyError, MeshLevel, ValidatedHierarchy, Verdict,
    };
}
