//! Update planning - pure per-PR decision logic
//!
//! No I/O happens here - the resolved PR details and reviews are passed in,
//! making the gating and conflict decisions easy to unit test.

use crate::types::{ConflictReport, PullRequestDetails, Review, ReviewState};

/// What to do with a pull request once its mergeable status is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Merge the base branch into the PR's head branch
    Update,
    /// Do not update; record the PR as conflicted
    ReportConflict(ConflictReport),
    /// Do not update and do not report; the PR is skipped entirely
    Skip {
        /// Human-readable reason for the skip
        reason: String,
    },
}

impl std::fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Update => write!(f, "update branch"),
            Self::ReportConflict(report) => write!(f, "report conflict: {}", report.url),
            Self::Skip { reason } => write!(f, "skip: {reason}"),
        }
    }
}

/// Count reviews in the approved state
pub fn count_approvals(reviews: &[Review]) -> usize {
    reviews
        .iter()
        .filter(|r| r.state == ReviewState::Approved)
        .count()
}

/// Decide what to do with a pull request (PURE - no I/O)
///
/// The approval gate runs first: with `required_approvals > 0` and fewer
/// approving reviews than required, the PR is skipped without an update
/// attempt and without a conflict report. Otherwise the decision follows the
/// mergeable status: `Some(true)` updates, `Some(false)` reports a conflict.
/// `None` should not reach this point (the poller resolves it first) and is
/// treated as a skip.
pub fn plan_update(
    details: &PullRequestDetails,
    reviews: &[Review],
    required_approvals: u32,
) -> UpdateAction {
    if required_approvals > 0 {
        let approvals = count_approvals(reviews);
        if approvals < required_approvals as usize {
            return UpdateAction::Skip {
                reason: format!(
                    "PR doesn't have {required_approvals} approvals (found {approvals})"
                ),
            };
        }
    }

    match details.mergeable {
        Some(true) => UpdateAction::Update,
        Some(false) => UpdateAction::ReportConflict(ConflictReport::from_details(details)),
        None => UpdateAction::Skip {
            reason: "mergeable status is still unknown".to_string(),
        },
    }
}
