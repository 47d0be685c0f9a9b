//! Platform services for the hosting API
//!
//! Provides the interface the update pipeline uses to talk to GitHub.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequestDetails, PullRequestSummary, Review};
use async_trait::async_trait;

/// Platform service trait for the pull-request operations the updater needs
///
/// This trait abstracts the hosting platform's REST API, allowing the
/// orchestration logic to be exercised against a mock in tests.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List open pull requests targeting the given base branch
    async fn list_open_prs(&self, base_branch: &str) -> Result<Vec<PullRequestSummary>>;

    /// Fetch a single pull request's details, including its tri-state
    /// mergeable status
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// List reviews for a pull request
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// Merge the base branch into the PR's head branch ("update branch")
    async fn update_branch(&self, pr_number: u64) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
