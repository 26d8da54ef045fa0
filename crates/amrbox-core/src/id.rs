//! Strongly-typed identifiers and the [`IndexVec`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// A single cell index along one axis.
///
/// Signed so that a shrunk or shifted bound can go below zero without
/// wrapping; domain checks reject negative lower bounds explicitly.
pub type Index = i64;

/// Per-axis index vector. Inline for up to three dimensions.
pub type IndexVec = SmallVec<[Index; 3]>;

/// Highest supported spatial dimensionality.
pub const MAX_DIM: usize = 3;

/// Identifies a refinement level.
///
/// `LevelNumber(0)` is the coarsest refinement-box level (`"L0"`). Level
/// names are translated to numbers once, at the configuration boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelNumber(pub u32);

impl LevelNumber {
    /// The level immediately coarser than this one, or `None` for level 0.
    pub fn coarser(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// The level immediately finer than this one.
    pub fn finer(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Level index as a `usize`, for slice indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<u32> for LevelNumber {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_number_displays_as_level_name() {
        assert_eq!(LevelNumber(0).to_string(), "L0");
        assert_eq!(LevelNumber(12).to_string(), "L12");
    }

    #[test]
    fn coarser_of_root_is_none() {
        assert_eq!(LevelNumber(0).coarser(), None);
        assert_eq!(LevelNumber(3).coarser(), Some(LevelNumber(2)));
    }

    #[test]
    fn finer_saturates() {
        assert_eq!(LevelNumber(1).finer(), LevelNumber(2));
        assert_eq!(LevelNumber(u32::MAX).finer(), LevelNumber(u32::MAX));
    }
}
