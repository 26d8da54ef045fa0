//! Test utilities for amrbox development.
//!
//! Provides a [`RawConfigBuilder`] that starts from a realistic simulation
//! configuration, and the 1-D scenario tables in [`fixtures`] shared by the
//! integration tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use amrbox_config::{ConfigValue, RawConfig};
use amrbox_core::Index;
use amrbox_geom::IndexBox;

/// 1-D box `lo..=hi`. Panics on inverted bounds; test use only.
pub fn span(lo: Index, hi: Index) -> IndexBox {
    IndexBox::span(lo, hi).unwrap_or_else(|e| panic!("bad test box {lo}..{hi}: {e}"))
}

/// Builder for raw configurations with the options a simulation front end
/// would normally send.
///
/// Starts from `cells = [65]`, the requested interpolation order, and a
/// handful of pass-through simulation options. Individual options are then
/// set, replaced, or removed.
pub struct RawConfigBuilder {
    raw: RawConfig,
}

impl RawConfigBuilder {
    pub fn new(interp_order: u8) -> Self {
        let raw = RawConfig::new()
            .with("cells", [65])
            .with("dl", [0.2])
            .with("time_step_nbr", 30)
            .with("final_time", 0.03)
            .with("boundary_types", ["periodic"])
            .with("interp_order", i64::from(interp_order))
            .with(
                "diag_options",
                ConfigValue::map([
                    ("format", ConfigValue::from("hdf5")),
                    (
                        "options",
                        ConfigValue::map([("dir", "diag_outputs"), ("mode", "overwrite")]),
                    ),
                ]),
            );
        Self { raw }
    }

    /// Set or replace an option.
    pub fn set(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.raw.set(key, value);
        self
    }

    /// Remove an option.
    pub fn without(mut self, key: &str) -> Self {
        self.raw.remove(key);
        self
    }

    /// Set `refinement_boxes` to one list of boxes per level, keyed
    /// `"L0"`, `"L1"`, ...
    pub fn levels(self, levels: &[&[(Index, Index)]]) -> Self {
        let map = ConfigValue::map(levels.iter().enumerate().map(|(k, spans)| {
            let boxes: Vec<IndexBox> = spans.iter().map(|&(lo, hi)| span(lo, hi)).collect();
            (format!("L{k}"), boxes)
        }));
        self.set("refinement_boxes", map)
    }

    pub fn build(self) -> RawConfig {
        self.raw
    }
}
