//! Update execution - effectful operations
//!
//! This module polls the platform until mergeability resolves, applies the
//! planned action per pull request, and drives the batch over every eligible
//! PR in list order.

use crate::config::ActionConfig;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{ConflictReport, PullRequestDetails};
use crate::update::plan::{plan_update, UpdateAction};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Options controlling one batch run
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Base branch whose open PRs are candidates
    pub base_branch: String,
    /// Minimum approving reviews before an update is attempted (0 = no gate)
    pub required_approvals: u32,
    /// Stop after the PR at this zero-based index has been processed
    /// (`-1` or `0` = unlimited)
    pub limit: i64,
    /// Delay between mergeability polls
    pub poll_interval: Duration,
    /// Cap on detail fetches per PR before giving up on mergeability
    pub max_poll_attempts: u32,
}

impl From<&ActionConfig> for UpdateOptions {
    fn from(config: &ActionConfig) -> Self {
        Self {
            base_branch: config.base_branch.clone(),
            required_approvals: config.required_approvals,
            limit: config.limit,
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts,
        }
    }
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Numbers of every PR that entered the per-PR pipeline, in order
    pub processed: Vec<u64>,
    /// PRs whose branch was updated
    pub updated: Vec<u64>,
    /// PRs skipped by the approval gate
    pub skipped: Vec<u64>,
    /// Conflict reports, in processing order
    pub conflicts: Vec<ConflictReport>,
}

impl BatchSummary {
    /// Whether any processed PR turned out to be conflicted
    pub const fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Fetch a PR's details until its mergeable status is definite
///
/// The first fetch happens immediately; each retry waits `poll_interval`
/// first. Gives up with [`Error::MergeableNeverResolved`] once `max_attempts`
/// fetches have returned an unknown status.
pub async fn resolve_mergeable(
    platform: &dyn PlatformService,
    pr_number: u64,
    poll_interval: Duration,
    max_attempts: u32,
) -> Result<PullRequestDetails> {
    for attempt in 1..=max_attempts {
        if attempt > 1 {
            sleep(poll_interval).await;
        }

        let details = platform.get_pr_details(pr_number).await?;
        if details.mergeable.is_some() {
            return Ok(details);
        }

        debug!(pr_number, attempt, "mergeable status still pending");
    }

    Err(Error::MergeableNeverResolved {
        number: pr_number,
        attempts: max_attempts,
    })
}

/// Run the per-PR pipeline: poll, gate, decide, apply
async fn process_pull_request(
    platform: &dyn PlatformService,
    pr_number: u64,
    options: &UpdateOptions,
) -> Result<UpdateAction> {
    let details = resolve_mergeable(
        platform,
        pr_number,
        options.poll_interval,
        options.max_poll_attempts,
    )
    .await?;

    // Reviews are only consulted when the gate is enabled.
    let reviews = if options.required_approvals > 0 {
        platform.list_reviews(pr_number).await?
    } else {
        Vec::new()
    };

    let action = plan_update(&details, &reviews, options.required_approvals);

    match &action {
        UpdateAction::Update => {
            info!(url = %details.html_url, "updating pull request");
            platform.update_branch(pr_number).await?;
        }
        UpdateAction::ReportConflict(_) => {
            info!(
                url = %details.html_url,
                "not updating pull request because it has conflicts"
            );
        }
        UpdateAction::Skip { reason } => {
            info!(pr_number, %reason, "skipping pull request");
        }
    }

    Ok(action)
}

/// Update every eligible open PR targeting the base branch (EFFECTFUL)
///
/// Lists open PRs, keeps those with auto-merge enabled, and processes them
/// sequentially in list order. A failure on any PR aborts the remaining
/// batch. The limit check runs after processing each item and compares the
/// zero-based index against the limit, so `limit = N` processes N+1 items -
/// a deliberate carry-over from the behavior downstream workflows rely on.
pub async fn run_autoupdate(
    platform: &dyn PlatformService,
    options: &UpdateOptions,
) -> Result<BatchSummary> {
    let prs = platform.list_open_prs(&options.base_branch).await?;

    let candidates: Vec<_> = prs.into_iter().filter(|pr| pr.auto_merge_enabled).collect();

    let branch_names = candidates
        .iter()
        .map(|pr| pr.head_label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    info!(branches = %branch_names, "will attempt to update the following branches");

    let stop_index =
        (options.limit > 0).then(|| usize::try_from(options.limit).unwrap_or(usize::MAX));

    let mut summary = BatchSummary::default();

    for (index, pr) in candidates.iter().enumerate() {
        summary.processed.push(pr.number);

        match process_pull_request(platform, pr.number, options).await? {
            UpdateAction::Update => summary.updated.push(pr.number),
            UpdateAction::ReportConflict(report) => summary.conflicts.push(report),
            UpdateAction::Skip { .. } => summary.skipped.push(pr.number),
        }

        if stop_index == Some(index) {
            warn!(limit = options.limit, "pull request limit hit, stopping");
            break;
        }
    }

    Ok(summary)
}
