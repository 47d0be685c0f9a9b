//! Configuration resolved from the CI runner's environment
//!
//! Action inputs arrive as `INPUT_*` environment variables and the event
//! context as `GITHUB_*` variables. Everything is read once at startup into
//! an explicit [`ActionConfig`] that gets passed to the components that need
//! it; nothing reads ambient process state after that.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Default delay between mergeability polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default cap on detail fetches while waiting for mergeability to resolve
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Resolved configuration for one run of the update step
#[derive(Clone)]
pub struct ActionConfig {
    /// Token for the hosting-platform API client
    pub repo_token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Base branch whose PRs should be updated
    pub base_branch: String,
    /// Minimum approving reviews before an update is attempted (0 = no gate)
    pub required_approvals: u32,
    /// Stop iterating once this zero-based index has been processed
    /// (`-1` or `0` = unlimited)
    pub limit: i64,
    /// Delay between mergeability polls
    pub poll_interval: Duration,
    /// Cap on detail fetches per PR before giving up on mergeability
    pub max_poll_attempts: u32,
    /// API base URL (supports GitHub Enterprise via `GITHUB_API_URL`)
    pub api_base: String,
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionConfig")
            .field("repo_token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("base_branch", &self.base_branch)
            .field("required_approvals", &self.required_approvals)
            .field("limit", &self.limit)
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl ActionConfig {
    /// Read the configuration from the environment
    pub fn from_env() -> Result<Self> {
        let repo_token = input("repo-token")
            .ok_or_else(|| Error::Config("missing required input 'repo-token'".to_string()))?;

        let required_approvals =
            clamp_to_u32(lenient_int(input("requiredApprovals").as_deref(), 0));
        let limit = lenient_int(input("limit").as_deref(), -1);

        let poll_interval = Duration::from_millis(clamp_to_u64(lenient_int(
            input("pollIntervalMs").as_deref(),
            i64::try_from(DEFAULT_POLL_INTERVAL_MS).unwrap_or(500),
        )));
        let max_poll_attempts = match clamp_to_u32(lenient_int(
            input("maxPollAttempts").as_deref(),
            i64::from(DEFAULT_MAX_POLL_ATTEMPTS),
        )) {
            0 => DEFAULT_MAX_POLL_ATTEMPTS,
            n => n,
        };

        let repository = env::var("GITHUB_REPOSITORY")
            .map_err(|_| Error::Config("GITHUB_REPOSITORY is not set".to_string()))?;
        let (owner, repo) = parse_repository(&repository)?;

        let git_ref = env::var("GITHUB_REF")
            .map_err(|_| Error::Config("GITHUB_REF is not set".to_string()))?;
        let base_branch = branch_from_ref(&git_ref);

        let api_base = env::var("GITHUB_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            repo_token,
            owner,
            repo,
            base_branch,
            required_approvals,
            limit,
            poll_interval,
            max_poll_attempts,
            api_base,
        })
    }
}

/// Read an action input, treating an empty value as absent
///
/// The runner exposes the input `foo-bar` as `INPUT_FOO-BAR` and passes an
/// empty string for inputs that were not supplied.
fn input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse a string-encoded integer input, falling back to a default when the
/// value is absent or unparsable
pub fn lenient_int(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Split `owner/repo` into its two parts
pub fn parse_repository(raw: &str) -> Result<(String, String)> {
    match raw.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "GITHUB_REPOSITORY must look like 'owner/repo', got '{raw}'"
        ))),
    }
}

/// Extract a branch name from a git ref
///
/// `refs/heads/main` becomes `main`; anything else is passed through
/// unchanged so the list query still receives a usable filter.
pub fn branch_from_ref(raw: &str) -> String {
    raw.strip_prefix("refs/heads/").unwrap_or(raw).to_string()
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn clamp_to_u64(value: i64) -> u64 {
    u64::try_from(value.max(0)).unwrap_or(0)
}
