//! Accept/reject outcome of a validation pass.

use crate::error::HierarchyError;
use crate::hierarchy::ValidatedHierarchy;
use amrbox_core::RejectReason;

/// Outcome of [`validate`](fn@crate::validate).
///
/// Rejection is an ordinary value, never a panic: a bad configuration
/// is discarded with the first violation found.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Verdict {
    /// The hierarchy passed every check.
    Accept(ValidatedHierarchy),
    /// The hierarchy was rejected.
    Reject(HierarchyError),
}

impl Verdict {
    /// Whether the hierarchy was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept(_))
    }

    /// Whether the hierarchy was rejected.
    pub fn is_reject(&self) -> bool {
        !self.is_accept()
    }

    /// Rejection category, or `None` when accepted.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accept(_) => None,
            Self::Reject(e) => Some(e.reason()),
        }
    }

    /// The accepted hierarchy, if any.
    pub fn accepted(&self) -> Option<&ValidatedHierarchy> {
        match self {
            Self::Accept(h) => Some(h),
            Self::Reject(_) => None,
        }
    }

    /// The rejection error, if any.
    pub fn error(&self) -> Option<&HierarchyError> {
        match self {
            Self::Accept(_) => None,
            Self::Reject(e) => Some(e),
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<ValidatedHierarchy, HierarchyError> {
        match self {
            Self::Accept(h) => Ok(h),
            Self::Reject(e) => Err(e),
        }
    }
}

impl From<Result<ValidatedHierarchy, HierarchyError>> for Verdict {
    fn from(result: Result<ValidatedHierarchy, HierarchyError>) -> Self {
        match result {
            Ok(h) => Self::Accept(h),
            Err(e) => Self::Reject(e),
        }
    }
}

impl From<Verdict> for Result<ValidatedHierarchy, HierarchyError> {
    fn from(verdict: Verdict) -> Self {
        verdict.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amrbox_core::LevelNumber;

    #[test]
    fn reject_exposes_reason_and_error() {
        let verdict = Verdict::from(Err(HierarchyError::MissingLevel {
            level: LevelNumber(1),
        }));
        assert!(verdict.is_reject());
        assert_eq!(verdict.reason(), Some(RejectReason::MissingRefinementLevel));
        assert!(verdict.accepted().is_none());
        assert!(verdict.error().is_some());
        assert!(verdict.into_result().is_err());
    }
}
