//! Closed integer index boxes.

use crate::error::BoxError;
use amrbox_core::{Index, IndexVec, MAX_DIM};
use std::fmt;

/// An axis-aligned, closed, integer-indexed hyperrectangle in 1 to 3 dimensions.
///
/// Both corners are inclusive: `IndexBox::span(5, 25)` covers the 21 cells
/// `5, 6, ..., 25`. The invariant `lower[i] <= upper[i]` holds on every axis
/// and is enforced at construction, so a live `IndexBox` is never empty.
///
/// Predicates comparing two boxes of different dimensionality return
/// `false`.
///
/// # Examples
///
/// ```
/// use amrbox_geom::IndexBox;
///
/// let coarse = IndexBox::span(5, 25).unwrap();
/// let fine = IndexBox::span(11, 19).unwrap();
/// assert!(coarse.contains(&fine));
/// assert!(coarse.contains_with_buffer(&fine, &[6]));
/// assert!(!coarse.contains_with_buffer(&fine, &[7]));
///
/// // Closed intervals: sharing the boundary index 15 is an overlap.
/// let left = IndexBox::span(5, 15).unwrap();
/// let right = IndexBox::span(15, 25).unwrap();
/// assert!(left.overlaps(&right));
///
/// // Inverted bounds are rejected.
/// assert!(IndexBox::span(9, 3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox {
    lower: IndexVec,
    upper: IndexVec,
}

impl IndexBox {
    /// Build a box from explicit lower and upper corners.
    ///
    /// Returns `Err(BoxError::DimensionMismatch)` if the corners differ in
    /// length, `Err(BoxError::UnsupportedDimension)` for 0 or more than
    /// [`MAX_DIM`] axes, and `Err(BoxError::Inverted)` if `lower > upper` on
    /// any axis.
    pub fn new(lower: &[Index], upper: &[Index]) -> Result<Self, BoxError> {
        if lower.len() != upper.len() {
            return Err(BoxError::DimensionMismatch {
                expected: lower.len(),
                got: upper.len(),
            });
        }
        if lower.is_empty() || lower.len() > MAX_DIM {
            return Err(BoxError::UnsupportedDimension { ndim: lower.len() });
        }
        for (axis, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
            if lo > hi {
                return Err(BoxError::Inverted {
                    axis,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self {
            lower: IndexVec::from_slice(lower),
            upper: IndexVec::from_slice(upper),
        })
    }

    /// One-dimensional convenience form: the cells `lower..=upper`.
    pub fn span(lower: Index, upper: Index) -> Result<Self, BoxError> {
        Self::new(&[lower], &[upper])
    }

    /// The whole domain of a level with `cells[i]` cells per axis:
    /// `[0, cells[i] - 1]`.
    pub fn domain(cells: &[Index]) -> Result<Self, BoxError> {
        if let Some((axis, &bad)) = cells.iter().enumerate().find(|&(_, &c)| c < 1) {
            return Err(BoxError::EmptyExtent { axis, cells: bad });
        }
        let lower: IndexVec = cells.iter().map(|_| 0).collect();
        let upper: IndexVec = cells.iter().map(|&c| c - 1).collect();
        Self::new(&lower, &upper)
    }

    /// Construct from corners already known to satisfy the invariant.
    pub(crate) fn from_valid_corners(lower: IndexVec, upper: IndexVec) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        debug_assert!(lower.iter().zip(&upper).all(|(lo, hi)| lo <= hi));
        Self { lower, upper }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.lower.len()
    }

    /// Inclusive lower corner.
    pub fn lower(&self) -> &[Index] {
        &self.lower
    }

    /// Inclusive upper corner.
    pub fn upper(&self) -> &[Index] {
        &self.upper
    }

    /// Number of cells along each axis.
    pub fn shape(&self) -> IndexVec {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| hi.saturating_sub(lo).saturating_add(1))
            .collect()
    }

    /// Total number of cells, saturating at `u64::MAX`.
    pub fn cell_count(&self) -> u64 {
        self.shape()
            .iter()
            .fold(1u64, |acc, &n| acc.saturating_mul(n as u64))
    }

    /// `true` iff `other` lies entirely inside `self`.
    pub fn contains(&self, other: &IndexBox) -> bool {
        self.ndim() == other.ndim()
            && self
                .axes()
                .zip(other.axes())
                .all(|((lo, hi), (olo, ohi))| olo >= lo && ohi <= hi)
    }

    /// `true` iff `other` lies inside `self` shrunk by `buffer[i]` cells on
    /// both faces of every axis `i`.
    ///
    /// This is the test applied between consecutive refinement levels. A
    /// negative buffer loosens the test; the validator rejects those before
    /// any geometry is checked.
    pub fn contains_with_buffer(&self, other: &IndexBox, buffer: &[Index]) -> bool {
        self.ndim() == other.ndim()
            && buffer.len() == self.ndim()
            && self
                .axes()
                .zip(other.axes())
                .zip(buffer)
                .all(|(((lo, hi), (olo, ohi)), &b)| {
                    olo >= lo.saturating_add(b) && ohi <= hi.saturating_sub(b)
                })
    }

    /// `true` iff the closed boxes share at least one cell.
    pub fn overlaps(&self, other: &IndexBox) -> bool {
        self.ndim() == other.ndim()
            && self
                .axes()
                .zip(other.axes())
                .all(|((lo, hi), (olo, ohi))| lo <= ohi && olo <= hi)
    }

    /// `true` iff `0 <= lower[i]` and `upper[i] < cells[i]` on every axis.
    pub fn within_domain(&self, cells: &[Index]) -> bool {
        cells.len() == self.ndim()
            && self
                .axes()
                .zip(cells)
                .all(|((lo, hi), &n)| lo >= 0 && hi < n)
    }

    /// The cells shared by both boxes, if any.
    pub fn intersection(&self, other: &IndexBox) -> Option<IndexBox> {
        if !self.overlaps(other) {
            return None;
        }
        let lower = self
            .axes()
            .zip(other.axes())
            .map(|((lo, _), (olo, _))| lo.max(olo))
            .collect();
        let upper = self
            .axes()
            .zip(other.axes())
            .map(|((_, hi), (_, ohi))| hi.min(ohi))
            .collect();
        Some(Self::from_valid_corners(lower, upper))
    }

    /// Map this box into the index space of the next-finer level.
    ///
    /// Cell `i` at ratio `r` becomes cells `i*r ..= i*r + r - 1`. Ratios
    /// below 1 are treated as 1. Returns `Err(BoxError::Overflow)` if a
    /// refined corner does not fit in an [`Index`].
    pub fn refine(&self, ratio: Index) -> Result<IndexBox, BoxError> {
        let r = ratio.max(1);
        let overflow = |axis| BoxError::Overflow { axis, ratio: r };
        let lower = self
            .lower
            .iter()
            .enumerate()
            .map(|(axis, &lo)| lo.checked_mul(r).ok_or_else(|| overflow(axis)))
            .collect::<Result<IndexVec, _>>()?;
        let upper = self
            .upper
            .iter()
            .enumerate()
            .map(|(axis, &hi)| {
                hi.checked_add(1)
                    .and_then(|end| end.checked_mul(r))
                    .and_then(|end| end.checked_sub(1))
                    .ok_or_else(|| overflow(axis))
            })
            .collect::<Result<IndexVec, _>>()?;
        Ok(Self::from_valid_corners(lower, upper))
    }

    fn axes(&self) -> impl Iterator<Item = (Index, Index)> + '_ {
        self.lower.iter().copied().zip(self.upper.iter().copied())
    }
}

impl fmt::Display for IndexBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box(lower={:?}, upper={:?})", self.lower(), self.upper())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn b(lo: Index, hi: Index) -> IndexBox {
        IndexBox::span(lo, hi).unwrap()
    }

    fn b2(lower: [Index; 2], upper: [Index; 2]) -> IndexBox {
        IndexBox::new(&lower, &upper).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn single_cell_box_is_valid() {
        let one = b(7, 7);
        assert_eq!(one.cell_count(), 1);
        assert_eq!(one.shape().as_slice(), &[1]);
    }

    #[test]
    fn inverted_box_rejected_with_axis() {
        let err = IndexBox::new(&[0, 9], &[4, 3]).unwrap_err();
        assert_eq!(
            err,
            BoxError::Inverted {
                axis: 1,
                lower: 9,
                upper: 3
            }
        );
    }

    #[test]
    fn corner_length_mismatch_rejected() {
        match IndexBox::new(&[0, 0], &[4]) {
            Err(BoxError::DimensionMismatch {
                expected: 2,
                got: 1,
            }) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_four_dimensions_rejected() {
        assert!(matches!(
            IndexBox::new(&[], &[]),
            Err(BoxError::UnsupportedDimension { ndim: 0 })
        ));
        assert!(matches!(
            IndexBox::new(&[0; 4], &[1; 4]),
            Err(BoxError::UnsupportedDimension { ndim: 4 })
        ));
    }

    #[test]
    fn domain_spans_all_cells() {
        let d = IndexBox::domain(&[65, 10]).unwrap();
        assert_eq!(d.lower(), &[0, 0]);
        assert_eq!(d.upper(), &[64, 9]);
        assert_eq!(d.cell_count(), 650);
    }

    #[test]
    fn domain_with_zero_cells_rejected() {
        assert!(matches!(
            IndexBox::domain(&[65, 0]),
            Err(BoxError::EmptyExtent { axis: 1, cells: 0 })
        ));
    }

    // ── Predicates ──────────────────────────────────────────────

    #[test]
    fn contains_requires_both_faces() {
        let outer = b(5, 25);
        assert!(outer.contains(&b(5, 25)));
        assert!(outer.contains(&b(10, 20)));
        assert!(!outer.contains(&b(4, 20)));
        assert!(!outer.contains(&b(10, 26)));
    }

    #[test]
    fn contains_with_buffer_shrinks_both_faces() {
        let outer = b(10, 51);
        assert!(outer.contains_with_buffer(&b(11, 49), &[1]));
        assert!(!outer.contains_with_buffer(&b(11, 49), &[2]));
        assert!(outer.contains_with_buffer(&b(10, 51), &[0]));
    }

    #[test]
    fn contains_with_buffer_per_axis() {
        let outer = b2([0, 0], [20, 20]);
        let inner = b2([1, 3], [19, 17]);
        assert!(outer.contains_with_buffer(&inner, &[1, 3]));
        assert!(!outer.contains_with_buffer(&inner, &[2, 3]));
        assert!(!outer.contains_with_buffer(&inner, &[1, 4]));
    }

    #[test]
    fn contains_with_buffer_wrong_buffer_length_is_false() {
        assert!(!b(0, 20).contains_with_buffer(&b(5, 6), &[0, 0]));
    }

    #[test]
    fn overlap_touching_boundary() {
        assert!(b(5, 15).overlaps(&b(15, 25)));
        assert!(!b(5, 14).overlaps(&b(15, 25)));
    }

    #[test]
    fn overlap_2d_needs_every_axis() {
        let a = b2([0, 0], [5, 5]);
        assert!(a.overlaps(&b2([5, 5], [8, 8])));
        assert!(!a.overlaps(&b2([0, 6], [5, 8])));
    }

    #[test]
    fn mixed_dimensions_never_related() {
        let one = b(0, 5);
        let two = b2([0, 0], [5, 5]);
        assert!(!one.contains(&two));
        assert!(!two.contains(&one));
        assert!(!one.overlaps(&two));
    }

    #[test]
    fn within_domain_upper_is_exclusive_cell_count() {
        assert!(b(0, 64).within_domain(&[65]));
        assert!(!b(0, 65).within_domain(&[65]));
        assert!(!b(-1, 10).within_domain(&[65]));
        assert!(!b(0, 10).within_domain(&[65, 65]));
    }

    #[test]
    fn intersection_of_touching_boxes_is_shared_cell() {
        let shared = b(5, 15).intersection(&b(15, 25)).unwrap();
        assert_eq!(shared, b(15, 15));
        assert_eq!(b(0, 4).intersection(&b(5, 9)), None);
    }

    #[test]
    fn refine_by_two() {
        assert_eq!(b(5, 25).refine(2), Ok(b(10, 51)));
        assert_eq!(b(12, 48).refine(2), Ok(b(24, 97)));
        assert_eq!(b(3, 3).refine(1), Ok(b(3, 3)));
        assert_eq!(b(3, 3).refine(0), Ok(b(3, 3)));
    }

    #[test]
    fn refine_at_the_edge_of_the_index_range() {
        // The last representable cell pair at ratio 2.
        let top = Index::MAX / 2;
        assert_eq!(b(top, top).refine(2), Ok(b(top * 2, top * 2 + 1)));
        assert_eq!(
            b(top + 1, top + 1).refine(2),
            Err(BoxError::Overflow { axis: 0, ratio: 2 })
        );
        // Upper corner overflows even when the lower one fits.
        assert_eq!(
            b(0, top).refine(3),
            Err(BoxError::Overflow { axis: 0, ratio: 3 })
        );
        let wide = b2([0, 0], [4, 5_000_000_000_000_000_000]);
        assert_eq!(
            wide.refine(2),
            Err(BoxError::Overflow { axis: 1, ratio: 2 })
        );
    }

    #[test]
    fn display_lists_corners() {
        assert_eq!(b(5, 25).to_string(), "Box(lower=[5], upper=[25])");
    }

    // ── Laws ────────────────────────────────────────────────────

    fn arb_box(ndim: usize) -> impl Strategy<Value = IndexBox> {
        prop::collection::vec((-50i64..50, 0i64..40), ndim).prop_map(|axes| {
            let lower: Vec<Index> = axes.iter().map(|&(lo, _)| lo).collect();
            let upper: Vec<Index> = axes.iter().map(|&(lo, len)| lo + len).collect();
            IndexBox::new(&lower, &upper).unwrap()
        })
    }

    fn arb_pair() -> impl Strategy<Value = (IndexBox, IndexBox)> {
        (1usize..=3).prop_flat_map(|n| (arb_box(n), arb_box(n)))
    }

    proptest! {
        #[test]
        fn overlaps_is_symmetric((a, b) in arb_pair()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn contains_is_reflexive(a in (1usize..=3).prop_flat_map(arb_box)) {
            prop_assert!(a.contains(&a));
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn buffer_only_tightens((a, b) in arb_pair(), buffer in 0i64..10) {
            let buf = vec![buffer; a.ndim()];
            if a.contains_with_buffer(&b, &buf) {
                prop_assert!(a.contains(&b));
            }
        }

        #[test]
        fn zero_buffer_is_plain_containment((a, b) in arb_pair()) {
            let buf = vec![0; a.ndim()];
            prop_assert_eq!(a.contains_with_buffer(&b, &buf), a.contains(&b));
        }

        #[test]
        fn intersection_agrees_with_overlap((a, b) in arb_pair()) {
            match a.intersection(&b) {
                Some(i) => {
                    prop_assert!(a.overlaps(&b));
                    prop_assert!(a.contains(&i));
                    prop_assert!(b.contains(&i));
                }
                None => prop_assert!(!a.overlaps(&b)),
            }
        }

        #[test]
        fn refine_scales_cell_count(a in (1usize..=3).prop_flat_map(arb_box), r in 1i64..5) {
            let fine = a.refine(r).unwrap();
            let expected = a.cell_count() * (r as u64).pow(a.ndim() as u32);
            prop_assert_eq!(fine.cell_count(), expected);
        }
    }
}
