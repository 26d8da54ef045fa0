//! Hierarchy validation errors.

use amrbox_config::ConfigError;
use amrbox_core::{IndexVec, LevelNumber, RejectReason};
use amrbox_geom::{BoxError, IndexBox};
use std::error::Error;
use std::fmt;

/// The first violation found while validating a hierarchy.
///
/// Every variant maps onto one [`RejectReason`] through
/// [`reason`](Self::reason).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HierarchyError {
    /// The configuration itself is invalid (unknown key, bad value, patch
    /// policy, malformed box spec).
    Config(ConfigError),
    /// A box spec could not be turned into a box of the right dimension.
    Box {
        /// Level the box belongs to.
        level: LevelNumber,
        /// Position of the box within its level.
        index: usize,
        /// Underlying construction error.
        source: BoxError,
    },
    /// A box lies outside its level's domain.
    OutOfDomain {
        /// Level the box belongs to.
        level: LevelNumber,
        /// Position of the box within its level.
        index: usize,
        /// The offending box.
        region: IndexBox,
        /// Domain extent of the level, in its own index space.
        cells: IndexVec,
    },
    /// Two boxes on the same level overlap.
    Overlap {
        /// The level.
        level: LevelNumber,
        /// Position of the first box of the pair.
        first: usize,
        /// Position of the second box of the pair.
        second: usize,
    },
    /// A box is not nested, with the nesting buffer, inside any box of the
    /// next-coarser level.
    NotNested {
        /// Level of the unnested box.
        level: LevelNumber,
        /// Position of the box within its level.
        index: usize,
        /// The offending box.
        region: IndexBox,
    },
    /// The same level number appears under two keys (e.g. `"L1"` and `1`).
    DuplicateLevel {
        /// The repeated level.
        level: LevelNumber,
    },
    /// Levels are not contiguous from level 0.
    MissingLevel {
        /// The first level number absent from the sequence.
        level: LevelNumber,
    },
    /// More mesh levels than `max_nbr_levels` allows.
    TooManyLevels {
        /// Mesh levels the refinement boxes would produce.
        levels: usize,
        /// Configured limit.
        max: u32,
    },
}

impl HierarchyError {
    /// Rejection category this error maps onto.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::Config(e) => e.reason(),
            Self::Box { source, .. } => source.reason(),
            Self::OutOfDomain { .. } => RejectReason::BoxOutOfDomain,
            Self::Overlap { .. } => RejectReason::IntraLevelOverlap,
            Self::NotNested { .. } => RejectReason::NotNestedInParent,
            Self::DuplicateLevel { .. } => RejectReason::MalformedBoxSpec,
            Self::MissingLevel { .. } => RejectReason::MissingRefinementLevel,
            Self::TooManyLevels { .. } => RejectReason::TooManyLevels,
        }
    }
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Box {
                level,
                index,
                source,
            } => write!(f, "box {index} on {level}: {source}"),
            Self::OutOfDomain {
                level,
                index,
                region,
                cells,
            } => write!(
                f,
                "box {index} on {level} ({region}) lies outside the level domain {:?}",
                cells.as_slice()
            ),
            Self::Overlap {
                level,
                first,
                second,
            } => write!(f, "boxes {first} and {second} on {level} overlap"),
            Self::NotNested {
                level,
                index,
                region,
            } => write!(
                f,
                "box {index} on {level} ({region}) is not nested in any box of the coarser level"
            ),
            Self::DuplicateLevel { level } => write!(f, "{level} is given more than once"),
            Self::MissingLevel { level } => {
                write!(f, "refinement levels skip {level}")
            }
            Self::TooManyLevels { levels, max } => write!(
                f,
                "refinement boxes produce {levels} mesh levels, max_nbr_levels is {max}"
            ),
        }
    }
}

impl Error for HierarchyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Box { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for HierarchyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_reason() {
        let err = HierarchyError::from(ConfigError::UnknownOption {
            key: "refined_particle_nbr".into(),
        });
        assert_eq!(err.reason(), RejectReason::UnknownConfigurationOption);
        assert!(err.source().is_some());
    }

    #[test]
    fn box_errors_chain_source() {
        let err = HierarchyError::Box {
            level: LevelNumber(0),
            index: 1,
            source: BoxError::Inverted {
                axis: 0,
                lower: 9,
                upper: 3,
            },
        };
        assert_eq!(err.reason(), RejectReason::BoxInverted);
        assert!(err.to_string().contains("L0"));
        assert!(err.source().is_some());
    }

    #[test]
    fn geometric_variants_have_no_source() {
        let err = HierarchyError::Overlap {
            level: LevelNumber(1),
            first: 0,
            second: 1,
        };
        assert_eq!(err.reason(), RejectReason::IntraLevelOverlap);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "boxes 0 and 1 on L1 overlap");
    }
}
