//! Configuration errors.

use amrbox_core::{Index, RejectReason};
use std::error::Error;
use std::fmt;

/// Errors detected while reading a [`RawConfig`](crate::RawConfig) or
/// checking the scalar invariants of a
/// [`HierarchyConfig`](crate::HierarchyConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A key outside the recognized schema.
    UnknownOption {
        /// The offending key.
        key: String,
    },
    /// A required key is absent.
    MissingOption {
        /// The missing key.
        key: &'static str,
    },
    /// A recognized key holds a value of the wrong type, shape, or range.
    InvalidValue {
        /// The offending key.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },
    /// A refinement-box spec or level key that cannot be interpreted.
    MalformedBoxSpec {
        /// Level key as written in the configuration.
        level: String,
        /// What is wrong with it.
        reason: String,
    },
    /// `largest_patch_size < smallest_patch_size` on some axis.
    PatchSizeInversion {
        /// The offending axis.
        axis: usize,
        /// Resolved smallest patch size on that axis.
        smallest: Index,
        /// Configured largest patch size on that axis.
        largest: Index,
    },
    /// A patch size outside its admissible range.
    PatchSizeOutOfRange {
        /// `"smallest_patch_size"` or `"largest_patch_size"`.
        key: &'static str,
        /// The offending axis.
        axis: usize,
        /// The offending value.
        value: Index,
        /// Which bound was violated.
        reason: String,
    },
    /// Negative nesting buffer, or one exceeding half a patch size.
    NestingBufferOutOfRange {
        /// The offending axis.
        axis: usize,
        /// Configured buffer on that axis.
        buffer: Index,
        /// Which bound was violated.
        reason: String,
    },
}

impl ConfigError {
    /// Rejection category this error maps onto.
    pub fn reason(&self) -> RejectReason {
        match self {
            Self::UnknownOption { .. } => RejectReason::UnknownConfigurationOption,
            Self::MissingOption { .. } => RejectReason::MissingConfigurationOption,
            Self::InvalidValue { .. } => RejectReason::InvalidConfigurationValue,
            Self::MalformedBoxSpec { .. } => RejectReason::MalformedBoxSpec,
            Self::PatchSizeInversion { .. } => RejectReason::PatchSizeInversion,
            Self::PatchSizeOutOfRange { .. } => RejectReason::PatchSizeOutOfRange,
            Self::NestingBufferOutOfRange { .. } => RejectReason::NestingBufferOutOfRange,
        }
    }

    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(level: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::MalformedBoxSpec {
            level: level.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption { key } => write!(f, "unknown configuration option '{key}'"),
            Self::MissingOption { key } => write!(f, "missing required option '{key}'"),
            Self::InvalidValue { key, reason } => write!(f, "invalid value for '{key}': {reason}"),
            Self::MalformedBoxSpec { level, reason } => {
                write!(f, "malformed refinement boxes for level {level}: {reason}")
            }
            Self::PatchSizeInversion {
                axis,
                smallest,
                largest,
            } => write!(
                f,
                "largest_patch_size {largest} is below smallest_patch_size {smallest} \
                 on axis {axis}"
            ),
            Self::PatchSizeOutOfRange {
                key,
                axis,
                value,
                reason,
            } => write!(f, "{key} {value} on axis {axis} out of range: {reason}"),
            Self::NestingBufferOutOfRange {
                axis,
                buffer,
                reason,
            } => write!(f, "nesting_buffer {buffer} on axis {axis} out of range: {reason}"),
        }
    }
}

impl Error for ConfigError {}
