//! Branch-update engine
//!
//! Two-phase pattern per pull request:
//! 1. Plan - decide what to do with a resolved PR (pure, testable)
//! 2. Execute - poll mergeability, apply the decision (effectful)

mod execute;
mod plan;

pub use execute::{resolve_mergeable, run_autoupdate, BatchSummary, UpdateOptions};
pub use plan::{count_approvals, plan_update, UpdateAction};
