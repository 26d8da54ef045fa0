//! Machine-distinguishable rejection categories.
//!
//! Every error the validator can produce maps onto exactly one
//! [`RejectReason`]. Callers branch on the reason; the error value itself
//! carries the human-readable detail.

use std::fmt;

/// Why a hierarchy was rejected.
///
/// The set of variants and their [`code`](RejectReason::code) strings are
/// stable: the same input always yields the same reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    /// A box's lower bound exceeds its upper bound on some axis.
    BoxInverted,
    /// A box falls outside `[0, cells)` of its level's domain.
    BoxOutOfDomain,
    /// Two boxes on the same level intersect.
    IntraLevelOverlap,
    /// A finer-level box is not contained, with buffer, in any coarser box.
    NotNestedInParent,
    /// `largest_patch_size < smallest_patch_size` on some axis.
    PatchSizeInversion,
    /// A patch size is too small for the ghost width or too large for the domain.
    PatchSizeOutOfRange,
    /// The nesting buffer is negative or exceeds half a patch size.
    NestingBufferOutOfRange,
    /// A configuration key outside the recognized schema.
    UnknownConfigurationOption,
    /// A required configuration key is absent.
    MissingConfigurationOption,
    /// A recognized key holds a value of the wrong type, shape, or range.
    InvalidConfigurationValue,
    /// A box spec or level key that cannot be interpreted.
    MalformedBoxSpec,
    /// Refinement levels are not contiguous from level 0.
    MissingRefinementLevel,
    /// More refinement levels than `max_nbr_levels` allows.
    TooManyLevels,
}

impl RejectReason {
    /// Every reason, in declaration order.
    pub const ALL: [RejectReason; 13] = [
        Self::BoxInverted,
        Self::BoxOutOfDomain,
        Self::IntraLevelOverlap,
        Self::NotNestedInParent,
        Self::PatchSizeInversion,
        Self::PatchSizeOutOfRange,
        Self::NestingBufferOutOfRange,
        Self::UnknownConfigurationOption,
        Self::MissingConfigurationOption,
        Self::InvalidConfigurationValue,
        Self::MalformedBoxSpec,
        Self::MissingRefinementLevel,
        Self::TooManyLevels,
    ];

    /// Stable snake_case identifier for logs and cross-language callers.
    pub fn code(self) -> &'static str {
        match self {
            Self::BoxInverted => "box_inverted",
            Self::BoxOutOfDomain => "box_out_of_domain",
            Self::IntraLevelOverlap => "intra_level_overlap",
            Self::NotNestedInParent => "not_nested_in_parent",
            Self::PatchSizeInversion => "patch_size_inversion",
            Self::PatchSizeOutOfRange => "patch_size_out_of_range",
            Self::NestingBufferOutOfRange => "nesting_buffer_out_of_range",
            Self::UnknownConfigurationOption => "unknown_configuration_option",
            Self::MissingConfigurationOption => "missing_configuration_option",
            Self::InvalidConfigurationValue => "invalid_configuration_value",
            Self::MalformedBoxSpec => "malformed_box_spec",
            Self::MissingRefinementLevel => "missing_refinement_level",
            Self::TooManyLevels => "too_many_levels",
        }
    }

    /// Whether the reason comes from box geometry rather than scalar options.
    pub fn is_geometric(self) -> bool {
        matches!(
            self,
            Self::BoxInverted
                | Self::BoxOutOfDomain
                | Self::IntraLevelOverlap
                | Self::NotNestedInParent
        )
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<&str> = RejectReason::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes.len(), RejectReason::ALL.len());
    }

    #[test]
    fn display_matches_code() {
        for reason in RejectReason::ALL {
            assert_eq!(reason.to_string(), reason.code());
        }
    }

    #[test]
    fn geometric_reasons() {
        assert!(RejectReason::NotNestedInParent.is_geometric());
        assert!(RejectReason::BoxOutOfDomain.is_geometric());
        assert!(!RejectReason::PatchSizeInversion.is_geometric());
        assert!(!RejectReason::UnknownConfigurationOption.is_geometric());
    }
}
