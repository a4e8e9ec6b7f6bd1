//! Which status changes a candidate may go through, and who may make them.
//!
//! The screening service decides first (`Applied` to `shortlisted` or
//! `rejected`). HR can then confirm that decision or flip it once in either
//! direction. Nothing here touches storage; callers apply a [`Transition`]
//! with a conditional update on `from`.

use crate::errors::AppError;
use crate::models::candidate::CandidateStatus;

/// A permitted status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: CandidateStatus,
    pub to: CandidateStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    /// shortlisted -> rejected
    ToReject,
    /// rejected -> shortlisted
    ToShortlist,
}

impl Override {
    pub fn transition(self) -> Transition {
        match self {
            Override::ToReject => Transition {
                from: CandidateStatus::Shortlisted,
                to: CandidateStatus::Rejected,
            },
            Override::ToShortlist => Transition {
                from: CandidateStatus::Rejected,
                to: CandidateStatus::Shortlisted,
            },
        }
    }

    pub fn not_eligible(self) -> AppError {
        let message = match self {
            Override::ToReject => "Candidate not eligible for rejection override.",
            Override::ToShortlist => "Candidate not eligible for shortlist override.",
        };
        AppError::Validation(message.to_string())
    }

    /// Checks `current` against the override's expected starting status.
    pub fn check(self, current: CandidateStatus) -> Result<Transition, AppError> {
        let transition = self.transition();
        if current == transition.from {
            Ok(transition)
        } else {
            Err(self.not_eligible())
        }
    }

    /// Maps the outcome of the conditional write. No changed row means another
    /// decision moved the candidate off `from` after it was read.
    pub fn applied(self, changed: bool) -> Result<(), AppError> {
        if changed {
            Ok(())
        } else {
            Err(self.not_eligible())
        }
    }
}

/// The email HR sends when confirming the screening decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Selection,
    Rejection,
}

pub fn confirmation_for(current: CandidateStatus) -> Result<Confirmation, AppError> {
    match current {
        CandidateStatus::Shortlisted => Ok(Confirmation::Selection),
        CandidateStatus::Rejected => Ok(Confirmation::Rejection),
        CandidateStatus::Applied => Err(AppError::Conflict(
            "Candidate has not been screened yet".to_string(),
        )),
    }
}

/// A screening result may only decide a candidate that is still `Applied`.
pub fn screening_result(
    current: CandidateStatus,
    decided: CandidateStatus,
) -> Result<Transition, AppError> {
    if decided == CandidateStatus::Applied {
        return Err(AppError::Validation(
            "Screening status must be shortlisted or rejected".to_string(),
        ));
    }
    if current != CandidateStatus::Applied {
        return Err(AppError::Conflict(format!(
            "Candidate was already {current}"
        )));
    }
    Ok(Transition {
        from: CandidateStatus::Applied,
        to: decided,
    })
}

/// Maps the stored row of a conditional screening write. `None` means the
/// candidate left `Applied` after it was read.
pub fn screening_stored<T>(stored: Option<T>) -> Result<T, AppError> {
    stored.ok_or_else(|| AppError::Conflict("Candidate was already screened".to_string()))
}

/// The HR-supplied reason for an override, trimmed. Blank counts as missing.
pub fn require_reason(reason: Option<&str>) -> Result<&str, AppError> {
    reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("hrReason is required.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use CandidateStatus::*;

    #[test]
    fn test_override_to_reject_only_from_shortlisted() {
        assert_eq!(
            Override::ToReject.check(Shortlisted).unwrap(),
            Transition { from: Shortlisted, to: Rejected }
        );
        for status in [Applied, Rejected] {
            match Override::ToReject.check(status) {
                Err(AppError::Validation(msg)) => {
                    assert_eq!(msg, "Candidate not eligible for rejection override.")
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_override_to_shortlist_only_from_rejected() {
        assert_eq!(
            Override::ToShortlist.check(Rejected).unwrap().to,
            Shortlisted
        );
        assert!(Override::ToShortlist.check(Applied).is_err());
        assert!(Override::ToShortlist.check(Shortlisted).is_err());
    }

    #[test]
    fn test_overrides_are_inverse() {
        let a = Override::ToReject.transition();
        let b = Override::ToShortlist.transition();
        assert_eq!((a.from, a.to), (b.to, b.from));
    }

    #[test]
    fn test_confirmation_depends_on_status() {
        assert_eq!(confirmation_for(Shortlisted).unwrap(), Confirmation::Selection);
        assert_eq!(confirmation_for(Rejected).unwrap(), Confirmation::Rejection);
        assert!(matches!(confirmation_for(Applied), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_screening_decides_once() {
        assert_eq!(screening_result(Applied, Rejected).unwrap().to, Rejected);
        assert!(matches!(
            screening_result(Shortlisted, Rejected),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            screening_result(Applied, Applied),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_lost_override_race_is_not_eligible() {
        assert!(Override::ToReject.applied(true).is_ok());
        match Override::ToShortlist.applied(false) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Candidate not eligible for shortlist override.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_lost_screening_race_is_a_conflict() {
        assert_eq!(screening_stored(Some(7)).unwrap(), 7);
        match screening_stored::<i32>(None) {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Candidate was already screened"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_reason_required() {
        assert_eq!(require_reason(Some("  strong portfolio ")).unwrap(), "strong portfolio");
        assert!(require_reason(Some("   ")).is_err());
        assert!(require_reason(None).is_err());
    }
}
