//! Error types for box construction.

use amrbox_core::{Index, RejectReason, MAX_DIM};
use std::fmt;

/// Errors arising from [`IndexBox`](crate::IndexBox) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoxError {
    /// `lower > upper` on some axis.
    Inverted {
        /// The offending axis.
        axis: usize,
        /// Lower bound on that axis.
        lower: Index,
        /// Upper bound on that axis.
        upper: Index,
    },
    /// Lower and upper corners disagree on dimensionality, or the box does
    /// not match the dimensionality it is being used in.
    DimensionMismatch {
        /// Expected number of axes.
        expected: usize,
        /// Number of axes supplied.
        got: usize,
    },
    /// Zero axes, or more than [`MAX_DIM`].
    UnsupportedDimension {
        /// Number of axes supplied.
        ndim: usize,
    },
    /// A domain extent of zero or fewer cells.
    EmptyExtent {
        /// The offending axis.
        axis: usize,
        /// The configured extent.
        cells: Index,
    },
    /// Refining a box at `ratio` leaves the representable index range.
    Overflow {
        /// The offending axis.
        axis: usize,
        /// The refinement ratio applied.
        ratio: Index,
    },
}

impl BoxError {
    /// Rejection category this error maps onto.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::Inverted { .. } => RejectReason::BoxInverted,
            Self::DimensionMismatch { .. } | Self::UnsupportedDimension { .. } => {
                RejectReason::MalformedBoxSpec
            }
            Self::EmptyExtent { .. } | Self::Overflow { .. } => {
                RejectReason::InvalidConfigurationValue
            }
        }
    }
}

impl fmt::Display for BoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { axis, lower, upper } => {
                write!(f, "box lower {lower} exceeds upper {upper} on axis {axis}")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected} axes, got {got}")
            }
            Self::UnsupportedDimension { ndim } => {
                write!(f, "{ndim} axes is outside the supported range 1..={MAX_DIM}")
            }
            Self::EmptyExtent { axis, cells } => {
                write!(f, "extent {cells} on axis {axis} must be at least 1")
            }
            Self::Overflow { axis, ratio } => {
                write!(f, "refining at ratio {ratio} overflows the index range on axis {axis}")
            }
        }
    }
}

impl std::error::Error for BoxError {}
