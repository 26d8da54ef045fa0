//! The typed hierarchy configuration and its conversion from raw options.

use crate::boxspec::RefinementBoxes;
use crate::error::ConfigError;
use crate::policy::{PatchPolicy, PatchSizes};
use crate::value::{ConfigValue, RawConfig};
use amrbox_core::{Index, IndexVec, MAX_DIM};
use indexmap::IndexMap;

/// Options interpreted by the validator.
pub const RECOGNIZED_OPTIONS: &[&str] = &[
    "cells",
    "dim",
    "refinement_boxes",
    "smallest_patch_size",
    "largest_patch_size",
    "nesting_buffer",
    "interp_order",
    "refinement_ratio",
    "max_nbr_levels",
];

/// Simulation options the validator accepts but does not interpret. They
/// are carried through to the accepted hierarchy untouched.
pub const PASSTHROUGH_OPTIONS: &[&str] = &[
    "time_step",
    "time_step_nbr",
    "final_time",
    "dl",
    "domain_size",
    "origin",
    "boundary_types",
    "layout",
    "particle_pusher",
    "resistivity",
    "hyper_resistivity",
    "diag_options",
    "restart_options",
    "strict",
    "description",
    "refinement",
    "tag_threshold",
];

// ── HierarchyConfig ────────────────────────────────────────────────

/// Complete configuration for one refinement hierarchy.
///
/// Built either from a [`RawConfig`] with [`from_raw`](Self::from_raw), or
/// directly by Rust callers starting from [`new`](Self::new). Per-axis
/// vectors must have one entry per axis of `cells`; the raw path
/// broadcasts scalars for you.
///
/// # Examples
///
/// ```
/// use amrbox_config::{HierarchyConfig, RefinementBoxes};
/// use amrbox_geom::IndexBox;
///
/// let mut config = HierarchyConfig::new(&[65]).with_nesting_buffer(1);
/// config.refinement_boxes = Some(
///     RefinementBoxes::new()
///         .with_level("L0", [IndexBox::span(5, 25).unwrap()])
///         .with_level("L1", [IndexBox::span(11, 49).unwrap()]),
/// );
/// let policy = config.validate().unwrap();
/// assert_eq!(policy.nesting_buffer(), &[1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyConfig {
    /// Domain size in cells per axis. Its length is the dimensionality.
    pub cells: IndexVec,
    /// Particle interpolation order, 1 to 3. Default: 1.
    pub interp_order: u8,
    /// Index-space ratio between consecutive levels. Default: 2.
    pub refinement_ratio: Index,
    /// Upper bound on mesh levels (root included). `None` = as many as
    /// the refinement boxes describe.
    pub max_nbr_levels: Option<u32>,
    /// Patch-size and nesting-buffer options.
    pub patch_sizes: PatchSizes,
    /// Refinement boxes per level. `None` = root level only.
    pub refinement_boxes: Option<RefinementBoxes>,
    /// Recognized simulation options not interpreted here, in input order.
    pub passthrough: IndexMap<String, ConfigValue>,
}

impl HierarchyConfig {
    /// Default interpolation order.
    pub const DEFAULT_INTERP_ORDER: u8 = 1;

    /// Default refinement ratio.
    pub const DEFAULT_REFINEMENT_RATIO: Index = 2;

    /// A configuration for a domain of `cells`, with every other option at
    /// its default.
    pub fn new(cells: &[Index]) -> Self {
        Self {
            cells: IndexVec::from_slice(cells),
            interp_order: Self::DEFAULT_INTERP_ORDER,
            refinement_ratio: Self::DEFAULT_REFINEMENT_RATIO,
            max_nbr_levels: None,
            patch_sizes: PatchSizes::default(),
            refinement_boxes: None,
            passthrough: IndexMap::new(),
        }
    }

    /// Set `smallest_patch_size` to `size` on every axis.
    pub fn with_smallest_patch_size(mut self, size: Index) -> Self {
        self.patch_sizes.smallest = Some(self.broadcast(size));
        self
    }

    /// Set `largest_patch_size` to `size` on every axis.
    pub fn with_largest_patch_size(mut self, size: Index) -> Self {
        self.patch_sizes.largest = Some(self.broadcast(size));
        self
    }

    /// Set `nesting_buffer` to `buffer` on every axis.
    pub fn with_nesting_buffer(mut self, buffer: Index) -> Self {
        self.patch_sizes.nesting_buffer = self.broadcast(buffer);
        self
    }

    /// Set the refinement boxes.
    pub fn with_refinement_boxes(mut self, boxes: RefinementBoxes) -> Self {
        self.refinement_boxes = Some(boxes);
        self
    }

    /// Number of spatial dimensions.
    pub fn ndim(&self) -> usize {
        self.cells.len()
    }

    fn broadcast(&self, value: Index) -> IndexVec {
        smallvec::smallvec![value; self.ndim()]
    }

    /// Read a raw option map.
    ///
    /// Every key is checked against the schema before any value is looked
    /// at, so an unknown key is always reported as
    /// [`ConfigError::UnknownOption`] even when other values are also bad.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        if let Some((key, _)) = raw.iter().find(|(key, _)| {
            !RECOGNIZED_OPTIONS.contains(key) && !PASSTHROUGH_OPTIONS.contains(key)
        }) {
            return Err(ConfigError::UnknownOption {
                key: key.to_string(),
            });
        }

        let dim = match raw.get("dim") {
            None | Some(ConfigValue::None) => None,
            Some(value) => {
                let d = int("dim", value)?;
                match usize::try_from(d) {
                    Ok(d) if (1..=MAX_DIM).contains(&d) => Some(d),
                    _ => {
                        return Err(ConfigError::invalid(
                            "dim",
                            format!("must be 1 to {MAX_DIM}, got {d}"),
                        ))
                    }
                }
            }
        };
        let cells = match raw.get("cells") {
            None | Some(ConfigValue::None) => {
                return Err(ConfigError::MissingOption { key: "cells" })
            }
            Some(ConfigValue::List(items)) => {
                let cells = int_list("cells", items)?;
                if let Some(d) = dim {
                    if cells.len() != d {
                        return Err(ConfigError::invalid(
                            "cells",
                            format!("expected {d} values to match dim, got {}", cells.len()),
                        ));
                    }
                }
                cells
            }
            Some(value) => smallvec::smallvec![int("cells", value)?; dim.unwrap_or(1)],
        };

        let ndim = cells.len();
        let mut config = Self::new(&cells);

        if let Some(value) = present(raw, "interp_order") {
            let order = int("interp_order", value)?;
            config.interp_order = u8::try_from(order).map_err(|_| {
                ConfigError::invalid("interp_order", format!("must be 1 to 3, got {order}"))
            })?;
        }
        if let Some(value) = present(raw, "refinement_ratio") {
            config.refinement_ratio = int("refinement_ratio", value)?;
        }
        if let Some(value) = present(raw, "max_nbr_levels") {
            let max = int("max_nbr_levels", value)?;
            config.max_nbr_levels = Some(u32::try_from(max).map_err(|_| {
                ConfigError::invalid("max_nbr_levels", format!("must be at least 1, got {max}"))
            })?);
        }
        if let Some(value) = present(raw, "smallest_patch_size") {
            config.patch_sizes.smallest = Some(broadcastable("smallest_patch_size", value, ndim)?);
        }
        if let Some(value) = present(raw, "largest_patch_size") {
            config.patch_sizes.largest = Some(broadcastable("largest_patch_size", value, ndim)?);
        }
        if let Some(value) = present(raw, "nesting_buffer") {
            config.patch_sizes.nesting_buffer = broadcastable("nesting_buffer", value, ndim)?;
        }
        if let Some(value) = raw.get("refinement_boxes") {
            config.refinement_boxes = RefinementBoxes::from_value(value)?;
        }

        config.passthrough = raw
            .iter()
            .filter(|(key, _)| PASSTHROUGH_OPTIONS.contains(key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        tracing::debug!(
            ndim,
            levels = config.refinement_boxes.as_ref().map_or(0, RefinementBoxes::len),
            passthrough = config.passthrough.len(),
            "configuration parsed"
        );
        Ok(config)
    }

    /// Check the scalar invariants and resolve the patch policy.
    ///
    /// Geometry is not examined here. Checks run in a fixed order and the
    /// first violation is returned.
    pub fn validate(&self) -> Result<PatchPolicy, ConfigError> {
        // 1. Dimensionality and domain extent.
        let ndim = self.ndim();
        if ndim == 0 || ndim > MAX_DIM {
            return Err(ConfigError::invalid(
                "cells",
                format!("expected 1 to {MAX_DIM} axes, got {ndim}"),
            ));
        }
        if let Some(&n) = self.cells.iter().find(|&&n| n < 1) {
            return Err(ConfigError::invalid(
                "cells",
                format!("every axis needs at least one cell, got {n}"),
            ));
        }
        // 2. Scalar options.
        if !(1..=3).contains(&self.interp_order) {
            return Err(ConfigError::invalid(
                "interp_order",
                format!("must be 1 to 3, got {}", self.interp_order),
            ));
        }
        if self.refinement_ratio < 1 {
            return Err(ConfigError::invalid(
                "refinement_ratio",
                format!("must be at least 1, got {}", self.refinement_ratio),
            ));
        }
        if self.max_nbr_levels == Some(0) {
            return Err(ConfigError::invalid(
                "max_nbr_levels",
                "must be at least 1, got 0",
            ));
        }
        // 3. Patch sizes and nesting buffer.
        let policy = self.patch_sizes.resolve(&self.cells, self.interp_order)?;
        tracing::debug!(
            smallest = ?policy.smallest(),
            largest = ?policy.largest(),
            nesting_buffer = ?policy.nesting_buffer(),
            "patch policy resolved"
        );
        Ok(policy)
    }
}

// ── value helpers ──────────────────────────────────────────────────

fn present<'a>(raw: &'a RawConfig, key: &str) -> Option<&'a ConfigValue> {
    raw.get(key).filter(|v| !v.is_none())
}

fn int(key: &str, value: &ConfigValue) -> Result<Index, ConfigError> {
    value.as_int().ok_or_else(|| {
        ConfigError::invalid(key, format!("expected an integer, got {}", value.type_name()))
    })
}

fn int_list(key: &str, items: &[ConfigValue]) -> Result<IndexVec, ConfigError> {
    items.iter().map(|item| int(key, item)).collect()
}

fn broadcastable(key: &str, value: &ConfigValue, ndim: usize) -> Result<IndexVec, ConfigError> {
    match value {
        ConfigValue::List(items) => {
            let values = int_list(key, items)?;
            if values.len() != ndim {
                return Err(ConfigError::invalid(
                    key,
                    format!("expected 1 or {ndim} values, got {}", values.len()),
                ));
            }
            Ok(values)
        }
        other => Ok(smallvec::smallvec![int(key, other)?; ndim]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amrbox_geom::IndexBox;

    fn raw_1d() -> RawConfig {
        RawConfig::new().with("cells", [65])
    }

    #[test]
    fn minimal_config_takes_defaults() {
        let config = HierarchyConfig::from_raw(&raw_1d()).unwrap();
        assert_eq!(config.cells.as_slice(), &[65]);
        assert_eq!(config.interp_order, 1);
        assert_eq!(config.refinement_ratio, 2);
        assert_eq!(config.refinement_boxes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_key_reported_before_bad_values() {
        let raw = RawConfig::new()
            .with("cells", "not a number")
            .with("refined_particle_nbr", 1);
        match HierarchyConfig::from_raw(&raw) {
            Err(ConfigError::UnknownOption { key }) => assert_eq!(key, "refined_particle_nbr"),
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn first_unknown_key_in_insertion_order() {
        let raw = raw_1d().with("zeta", 1).with("alpha", 2);
        match HierarchyConfig::from_raw(&raw) {
            Err(ConfigError::UnknownOption { key }) => assert_eq!(key, "zeta"),
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn passthrough_options_preserved_in_order() {
        let raw = raw_1d()
            .with("time_step", 0.001)
            .with("boundary_types", ["periodic"])
            .with("final_time", 1.0);
        let config = HierarchyConfig::from_raw(&raw).unwrap();
        let keys: Vec<&str> = config.passthrough.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["time_step", "boundary_types", "final_time"]);
        assert_eq!(config.passthrough["time_step"], ConfigValue::Float(0.001));
    }

    #[test]
    fn missing_cells() {
        let raw = RawConfig::new().with("nesting_buffer", 1);
        assert_eq!(
            HierarchyConfig::from_raw(&raw),
            Err(ConfigError::MissingOption { key: "cells" })
        );
    }

    #[test]
    fn scalar_cells_broadcast_with_dim() {
        let raw = RawConfig::new().with("cells", 40).with("dim", 2);
        let config = HierarchyConfig::from_raw(&raw).unwrap();
        assert_eq!(config.cells.as_slice(), &[40, 40]);
        assert_eq!(config.ndim(), 2);
    }

    #[test]
    fn dim_outside_supported_range() {
        for dim in [i64::MAX, 1 << 33, 4, 0, -1] {
            let raw = RawConfig::new().with("cells", 65).with("dim", dim);
            assert!(
                matches!(
                    HierarchyConfig::from_raw(&raw),
                    Err(ConfigError::InvalidValue { key, .. }) if key == "dim"
                ),
                "dim = {dim}"
            );
        }
        let raw = RawConfig::new().with("cells", [40, 40, 40]).with("dim", 3);
        assert_eq!(HierarchyConfig::from_raw(&raw).unwrap().ndim(), 3);
    }

    #[test]
    fn cells_list_must_match_dim() {
        let raw = RawConfig::new().with("cells", [40, 40]).with("dim", 3);
        assert!(matches!(
            HierarchyConfig::from_raw(&raw),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn broadcast_patch_sizes() {
        let raw = RawConfig::new()
            .with("cells", [65, 65])
            .with("smallest_patch_size", 10)
            .with("largest_patch_size", [20, 30])
            .with("nesting_buffer", 2);
        let config = HierarchyConfig::from_raw(&raw).unwrap();
        let policy = config.validate().unwrap();
        assert_eq!(policy.smallest(), &[10, 10]);
        assert_eq!(policy.largest(), Some(&[20, 30][..]));
        assert_eq!(policy.nesting_buffer(), &[2, 2]);
    }

    #[test]
    fn wrong_length_patch_size_list() {
        let raw = raw_1d().with("largest_patch_size", [20, 20]);
        assert!(matches!(
            HierarchyConfig::from_raw(&raw),
            Err(ConfigError::InvalidValue { key, .. }) if key == "largest_patch_size"
        ));
    }

    #[test]
    fn float_where_integer_expected() {
        let raw = raw_1d().with("nesting_buffer", 1.5);
        assert!(matches!(
            HierarchyConfig::from_raw(&raw),
            Err(ConfigError::InvalidValue { key, .. }) if key == "nesting_buffer"
        ));
    }

    #[test]
    fn explicit_none_means_default() {
        let raw = raw_1d()
            .with("refinement_boxes", ConfigValue::None)
            .with("largest_patch_size", ConfigValue::None);
        let config = HierarchyConfig::from_raw(&raw).unwrap();
        assert_eq!(config.refinement_boxes, None);
        assert_eq!(config.patch_sizes.largest, None);
    }

    #[test]
    fn refinement_boxes_parsed() {
        let raw = raw_1d().with(
            "refinement_boxes",
            ConfigValue::map([("L0", vec![IndexBox::span(5, 25).unwrap()])]),
        );
        let config = HierarchyConfig::from_raw(&raw).unwrap();
        assert_eq!(config.refinement_boxes.map(|b| b.len()), Some(1));
    }

    #[test]
    fn validate_rejects_bad_scalars() {
        let mut config = HierarchyConfig::new(&[65]);
        config.interp_order = 4;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { key, .. }) if key == "interp_order"));

        let mut config = HierarchyConfig::new(&[65]);
        config.refinement_ratio = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { key, .. }) if key == "refinement_ratio"));

        let mut config = HierarchyConfig::new(&[65]);
        config.max_nbr_levels = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { key, .. }) if key == "max_nbr_levels"));
    }

    #[test]
    fn validate_rejects_bad_domains() {
        assert!(HierarchyConfig::new(&[]).validate().is_err());
        assert!(HierarchyConfig::new(&[8, 8, 8, 8]).validate().is_err());
        assert!(HierarchyConfig::new(&[65, 0]).validate().is_err());
    }

    #[test]
    fn builder_broadcasts_over_axes() {
        let config = HierarchyConfig::new(&[32, 32, 32])
            .with_smallest_patch_size(8)
            .with_largest_patch_size(16)
            .with_nesting_buffer(2);
        let policy = config.validate().unwrap();
        assert_eq!(policy.smallest(), &[8, 8, 8]);
        assert_eq!(policy.largest(), Some(&[16, 16, 16][..]));
        assert_eq!(policy.nesting_buffer(), &[2, 2, 2]);
    }

    #[test]
    fn interp_order_out_of_u8_range() {
        let raw = raw_1d().with("interp_order", 300);
        assert!(matches!(
            HierarchyConfig::from_raw(&raw),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
