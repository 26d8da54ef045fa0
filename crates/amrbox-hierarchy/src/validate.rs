//! The validation pass.

use crate::error::HierarchyError;
use crate::hierarchy::{level_domain, ValidatedHierarchy};
use crate::level::Level;
use crate::verdict::Verdict;
use amrbox_config::{ConfigError, HierarchyConfig, LevelSpec, RawConfig};
use amrbox_core::LevelNumber;
use amrbox_geom::{boxset, IndexBox};

/// Validate a raw option map.
///
/// Unknown keys are rejected before anything else is examined; the
/// remaining options are converted with [`HierarchyConfig::from_raw`] and
/// checked by [`validate_config`].
///
/// # Examples
///
/// ```
/// use amrbox_config::{ConfigValue, RawConfig};
/// use amrbox_core::RejectReason;
/// use amrbox_geom::IndexBox;
/// use amrbox_hierarchy::validate;
///
/// let boxes = |l1: IndexBox| {
///     ConfigValue::map([
///         ("L0", vec![IndexBox::span(5, 25).unwrap()]),
///         ("L1", vec![l1]),
///     ])
/// };
///
/// let raw = RawConfig::new()
///     .with("cells", 65)
///     .with("refinement_boxes", boxes(IndexBox::span(12, 48).unwrap()));
/// assert!(validate(&raw).is_accept());
///
/// let raw = RawConfig::new()
///     .with("cells", 65)
///     .with("refinement_boxes", boxes(IndexBox::span(9, 60).unwrap()));
/// assert_eq!(validate(&raw).reason(), Some(RejectReason::NotNestedInParent));
/// ```
pub fn validate(raw: &RawConfig) -> Verdict {
    let result = HierarchyConfig::from_raw(raw)
        .map_err(HierarchyError::from)
        .and_then(|config| check(&config));
    log_outcome(&result);
    Verdict::from(result)
}

/// Validate a typed configuration.
///
/// For callers that build a [`HierarchyConfig`] directly instead of going
/// through a raw option map.
pub fn validate_config(config: &HierarchyConfig) -> Result<ValidatedHierarchy, HierarchyError> {
    let result = check(config);
    log_outcome(&result);
    result
}

fn log_outcome(result: &Result<ValidatedHierarchy, HierarchyError>) {
    match result {
        Ok(h) => tracing::debug!(
            mesh_levels = h.mesh_level_count(),
            ndim = h.ndim(),
            "hierarchy accepted"
        ),
        Err(e) => tracing::debug!(reason = %e.reason(), error = %e, "hierarchy rejected"),
    }
}

/// Checks performed, in order; the first violation is returned:
///
/// 1. Scalar options and patch policy.
/// 2. Level keys: numbering, duplicates, gaps.
/// 3. Per-level consistency: boxes well formed, disjoint, in domain.
/// 4. Cross-level nesting with the nesting buffer.
/// 5. Level count against `max_nbr_levels`.
fn check(config: &HierarchyConfig) -> Result<ValidatedHierarchy, HierarchyError> {
    // 1. Scalar options and patch policy
    let policy = config.validate()?;
    let root = IndexBox::domain(&config.cells).map_err(|e| ConfigError::InvalidValue {
        key: "cells".to_string(),
        reason: e.to_string(),
    })?;

    // 2. Level keys
    let specs = match &config.refinement_boxes {
        Some(boxes) => number_levels(boxes.levels())?,
        None => Vec::new(),
    };

    // 3. Per-level consistency
    let levels = specs
        .into_iter()
        .map(|(number, spec)| -> Result<Level, HierarchyError> {
            let domain = level_domain(&config.cells, config.refinement_ratio, number)
                .ok_or_else(|| index_range_exceeded(number))?;
            Level::from_spec(number, spec, &domain)
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(levels = levels.len(), "levels normalized");

    // 4. Cross-level nesting
    let refined = levels
        .iter()
        .map(|level| {
            boxset::refine_all(level.boxes(), config.refinement_ratio)
                .map_err(|_| index_range_exceeded(level.number().finer()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    for (parents, child) in refined.iter().zip(levels.iter().skip(1)) {
        for (index, b) in child.boxes().iter().enumerate() {
            match boxset::find_container_with_buffer(parents, b, policy.nesting_buffer()) {
                Some(container) => tracing::trace!(
                    level = %child.number(),
                    index,
                    container,
                    "box nested"
                ),
                None => {
                    return Err(HierarchyError::NotNested {
                        level: child.number(),
                        index,
                        region: b.clone(),
                    })
                }
            }
        }
    }

    // 5. Level count
    if let Some(max) = config.max_nbr_levels {
        let mesh_levels = levels.len() + 1;
        if mesh_levels > max as usize {
            return Err(HierarchyError::TooManyLevels {
                levels: mesh_levels,
                max,
            });
        }
    }

    Ok(ValidatedHierarchy {
        cells: config.cells.clone(),
        root,
        interp_order: config.interp_order,
        refinement_ratio: config.refinement_ratio,
        policy,
        levels,
        refined,
        passthrough: config.passthrough.clone(),
    })
}

/// A level whose index space, `cells * ratio^k`, does not fit in an
/// [`Index`](amrbox_core::Index).
fn index_range_exceeded(number: LevelNumber) -> ConfigError {
    ConfigError::InvalidValue {
        key: "cells".to_string(),
        reason: format!("the {number} index space exceeds the 64-bit index range"),
    }
}

/// Translate level keys to numbers and order the levels, rejecting
/// duplicates and gaps.
fn number_levels(specs: &[LevelSpec]) -> Result<Vec<(LevelNumber, &LevelSpec)>, HierarchyError> {
    let mut numbered = specs
        .iter()
        .map(|spec| Ok((spec.key.level_number()?, spec)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    numbered.sort_by_key(|&(number, _)| number);

    for (i, &(number, _)) in numbered.iter().enumerate() {
        if i > 0 && numbered[i - 1].0 == number {
            return Err(HierarchyError::DuplicateLevel { level: number });
        }
        if number.index() != i {
            let expected = u32::try_from(i).unwrap_or(u32::MAX);
            return Err(HierarchyError::MissingLevel {
                level: LevelNumber(expected),
            });
        }
    }
    Ok(numbered)
}
