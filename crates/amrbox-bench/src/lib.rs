//! Benchmark profiles for the amrbox validator.
//!
//! Provides pre-built [`HierarchyConfig`] profiles for benchmarking:
//!
//! - [`stacked_profile`]: a 1-D hierarchy with many boxes per level and
//!   many levels, every box nested in its refined parent
//! - [`cube_profile`]: a 3-D root level cut into a grid of L0 boxes with one
//!   nested L1 box each

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use amrbox_config::{HierarchyConfig, RefinementBoxes};
use amrbox_geom::{BoxError, IndexBox};

/// Build a 1-D hierarchy of `levels` levels over `cells` cells.
///
/// L0 holds `boxes` disjoint boxes of equal stride, each one cell in from
/// its stride's edges. Each finer level refines every parent box at ratio 2
/// and shrinks it by two cells on each side, so nesting holds with a
/// buffer of 1.
pub fn stacked_profile(cells: i64, boxes: i64, levels: usize) -> Result<HierarchyConfig, BoxError> {
    let stride = cells / boxes.max(1);
    let mut spans: Vec<(i64, i64)> = (0..boxes)
        .map(|i| (i * stride + 1, (i + 1) * stride - 2))
        .collect();

    let mut refinement = RefinementBoxes::new();
    for k in 0..levels {
        let level = spans
            .iter()
            .map(|&(lo, hi)| IndexBox::span(lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        refinement = refinement.with_level(format!("L{k}"), level);
        spans = spans
            .iter()
            .map(|&(lo, hi)| (2 * lo + 2, 2 * hi - 1))
            .collect();
    }

    Ok(HierarchyConfig::new(&[cells])
        .with_nesting_buffer(1)
        .with_largest_patch_size(cells.min(32))
        .with_refinement_boxes(refinement))
}

/// Build a 3-D `n x n x n` root with `per_axis^3` L0 boxes, each holding one
/// L1 box.
pub fn cube_profile(n: i64, per_axis: i64) -> Result<HierarchyConfig, BoxError> {
    let stride = n / per_axis.max(1);
    let mut l0 = Vec::new();
    let mut l1 = Vec::new();
    for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                let lo = [i * stride + 1, j * stride + 1, k * stride + 1];
                let hi = [lo[0] + stride - 3, lo[1] + stride - 3, lo[2] + stride - 3];
                l0.push(IndexBox::new(&lo, &hi)?);
                let child_lo = lo.map(|x| 2 * x + 1);
                let child_hi = hi.map(|x| 2 * x);
                l1.push(IndexBox::new(&child_lo, &child_hi)?);
            }
        }
    }
    Ok(HierarchyConfig::new(&[n, n, n])
        .with_largest_patch_size(n.min(16))
        .with_refinement_boxes(
            RefinementBoxes::new()
                .with_level("L0", l0)
                .with_level("L1", l1),
        ))
}
