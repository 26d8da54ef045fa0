//! Patch-size and nesting-buffer policy.
//!
//! [`PatchSizes`] is what the configuration says; [`PatchPolicy`] is what
//! the validator and the patch tiler use, with defaults filled in and every
//! scalar invariant checked.

use crate::error::ConfigError;
use amrbox_core::{Index, IndexVec};

/// Ghost cells a patch needs on each side for interpolation order
/// `interp_order`: the particle shape-function support plus one primal
/// ghost.
///
/// The default `smallest_patch_size` is one more than this, so that two
/// non-adjacent patches can never share a ghost cell.
pub fn ghost_width(interp_order: u8) -> Index {
    Index::from(interp_order) + 2
}

/// Patch-size options as configured, one entry per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchSizes {
    /// Minimum patch extent. `None` = ghost width + 1.
    pub smallest: Option<IndexVec>,
    /// Maximum patch extent. `None` = unbounded.
    pub largest: Option<IndexVec>,
    /// Margin a finer box keeps from its parent's faces. Empty = 0 on
    /// every axis.
    pub nesting_buffer: IndexVec,
}

impl PatchSizes {
    /// Fill in defaults and check the scalar invariants, in order:
    ///
    /// 1. `largest >= smallest` on every axis.
    /// 2. `ghost_width < smallest <= cells` and `0 < largest <= cells`.
    /// 3. `0 <= nesting_buffer`, `2 * nesting_buffer <= smallest` and, when
    ///    a largest size is set, `2 * nesting_buffer <= largest`.
    ///
    /// `cells` fixes the dimensionality; every vector here must already
    /// match it.
    pub fn resolve(&self, cells: &[Index], interp_order: u8) -> Result<PatchPolicy, ConfigError> {
        let ndim = cells.len();
        let ghost = ghost_width(interp_order);

        let smallest: IndexVec = match &self.smallest {
            Some(s) => {
                check_len("smallest_patch_size", s, ndim)?;
                s.clone()
            }
            None => smallvec::smallvec![ghost + 1; ndim],
        };
        if let Some(l) = &self.largest {
            check_len("largest_patch_size", l, ndim)?;
        }
        let nesting_buffer: IndexVec = if self.nesting_buffer.is_empty() {
            smallvec::smallvec![0; ndim]
        } else {
            check_len("nesting_buffer", &self.nesting_buffer, ndim)?;
            self.nesting_buffer.clone()
        };

        if let Some(largest) = &self.largest {
            for (axis, (&s, &l)) in smallest.iter().zip(largest).enumerate() {
                if l < s {
                    return Err(ConfigError::PatchSizeInversion {
                        axis,
                        smallest: s,
                        largest: l,
                    });
                }
            }
        }

        for (axis, (&s, &n)) in smallest.iter().zip(cells).enumerate() {
            if s <= ghost {
                return Err(ConfigError::PatchSizeOutOfRange {
                    key: "smallest_patch_size",
                    axis,
                    value: s,
                    reason: format!("must exceed the ghost width {ghost}"),
                });
            }
            if s > n {
                return Err(ConfigError::PatchSizeOutOfRange {
                    key: "smallest_patch_size",
                    axis,
                    value: s,
                    reason: format!("exceeds the {n} cells of the domain"),
                });
            }
        }
        if let Some(largest) = &self.largest {
            for (axis, (&l, &n)) in largest.iter().zip(cells).enumerate() {
                if l <= 0 {
                    return Err(ConfigError::PatchSizeOutOfRange {
                        key: "largest_patch_size",
                        axis,
                        value: l,
                        reason: "must be positive".to_string(),
                    });
                }
                if l > n {
                    return Err(ConfigError::PatchSizeOutOfRange {
                        key: "largest_patch_size",
                        axis,
                        value: l,
                        reason: format!("exceeds the {n} cells of the domain"),
                    });
                }
            }
        }

        for (axis, &buffer) in nesting_buffer.iter().enumerate() {
            if buffer < 0 {
                return Err(ConfigError::NestingBufferOutOfRange {
                    axis,
                    buffer,
                    reason: "cannot be negative".to_string(),
                });
            }
            let twice = buffer.saturating_mul(2);
            if twice > smallest[axis] {
                return Err(ConfigError::NestingBufferOutOfRange {
                    axis,
                    buffer,
                    reason: format!(
                        "exceeds half the smallest_patch_size {}",
                        smallest[axis]
                    ),
                });
            }
            if let Some(largest) = &self.largest {
                if twice > largest[axis] {
                    return Err(ConfigError::NestingBufferOutOfRange {
                        axis,
                        buffer,
                        reason: format!("exceeds half the largest_patch_size {}", largest[axis]),
                    });
                }
            }
        }

        Ok(PatchPolicy {
            smallest,
            largest: self.largest.clone(),
            nesting_buffer,
            ghost_width: ghost,
        })
    }
}

fn check_len(key: &str, values: &[Index], ndim: usize) -> Result<(), ConfigError> {
    if values.len() == ndim {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("expected {ndim} values, got {}", values.len()),
        ))
    }
}

/// Resolved, checked patch-size policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchPolicy {
    smallest: IndexVec,
    largest: Option<IndexVec>,
    nesting_buffer: IndexVec,
    ghost_width: Index,
}

impl PatchPolicy {
    /// Minimum patch extent per axis.
    pub fn smallest(&self) -> &[Index] {
        &self.smallest
    }

    /// Maximum patch extent per axis, if bounded.
    pub fn largest(&self) -> Option<&[Index]> {
        self.largest.as_deref()
    }

    /// Nesting buffer per axis.
    pub fn nesting_buffer(&self) -> &[Index] {
        &self.nesting_buffer
    }

    /// Ghost width the smallest patch size was checked against.
    pub fn ghost_width(&self) -> Index {
        self.ghost_width
    }
}
