//! Predicates and reductions over slices of boxes.
//!
//! Box counts per refinement level are small, so the pairwise searches here
//! are plain O(k²) scans that report the first offending pair in insertion
//! order. That ordering is what makes rejections reproducible.

use crate::error::BoxError;
use crate::index_box::IndexBox;
use amrbox_core::{Index, IndexVec};

/// Indices `(i, j)`, `i < j`, of the first pair of overlapping boxes.
///
/// Pairs are visited in lexicographic order of `(i, j)`.
pub fn first_overlap(boxes: &[IndexBox]) -> Option<(usize, usize)> {
    boxes.iter().enumerate().find_map(|(i, a)| {
        boxes[i + 1..]
            .iter()
            .position(|b| a.overlaps(b))
            .map(|offset| (i, i + 1 + offset))
    })
}

/// `true` iff any two boxes in the slice overlap.
pub fn any_overlap(boxes: &[IndexBox]) -> bool {
    first_overlap(boxes).is_some()
}

/// Index of the first box not within `[0, cells)`.
pub fn first_outside_domain(boxes: &[IndexBox], cells: &[Index]) -> Option<usize> {
    boxes.iter().position(|b| !b.within_domain(cells))
}

/// Smallest box covering every box in the slice.
///
/// Returns `None` for an empty slice or when the boxes disagree on
/// dimensionality.
pub fn bounding_box(boxes: &[IndexBox]) -> Option<IndexBox> {
    let (first, rest) = boxes.split_first()?;
    let mut lower: IndexVec = first.lower().into();
    let mut upper: IndexVec = first.upper().into();
    for b in rest {
        if b.ndim() != first.ndim() {
            return None;
        }
        for axis in 0..lower.len() {
            lower[axis] = lower[axis].min(b.lower()[axis]);
            upper[axis] = upper[axis].max(b.upper()[axis]);
        }
    }
    Some(IndexBox::from_valid_corners(lower, upper))
}

/// Index of the first `parent` that contains `child` with `buffer` cells of
/// margin on every face.
pub fn find_container_with_buffer(
    parents: &[IndexBox],
    child: &IndexBox,
    buffer: &[Index],
) -> Option<usize> {
    parents
        .iter()
        .position(|p| p.contains_with_buffer(child, buffer))
}

/// Total cells covered, assuming the boxes are disjoint.
pub fn total_cells(boxes: &[IndexBox]) -> u64 {
    boxes
        .iter()
        .fold(0u64, |acc, b| acc.saturating_add(b.cell_count()))
}

/// Every box mapped into the next-finer index space. Fails on the first box
/// whose refinement overflows.
pub fn refine_all(boxes: &[IndexBox], ratio: Index) -> Result<Vec<IndexBox>, BoxError> {
    boxes.iter().map(|b| b.refine(ratio)).collect()
}
