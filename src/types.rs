//! Core types for pr-autoupdate

use serde::{Deserialize, Serialize};

/// A pull request as returned by the list query
///
/// This is an immutable snapshot; the `mergeable` status is deliberately
/// absent because the list endpoint never computes it. A detail fetch is
/// required for that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// Head branch label (e.g. "owner:feature-x")
    pub head_label: String,
    /// Whether the author enabled auto-merge on this PR
    pub auto_merge_enabled: bool,
}

/// PR author identity, as exposed in conflict reports
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Account login
    pub login: String,
    /// Profile URL
    pub html_url: String,
    /// Avatar image URL
    pub avatar_url: String,
}

/// Extended PR information from a per-PR detail fetch
///
/// `mergeable` is tri-state: `Some(true)` means cleanly mergeable,
/// `Some(false)` means conflicts, `None` means GitHub is still computing.
/// Within one polling session it only transitions `None` → `Some(_)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Whether the PR can be merged without conflicts (None = still computing)
    pub mergeable: Option<bool>,
    /// PR author
    pub author: Author,
}

/// State of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewState {
    /// Reviewer approved the PR
    Approved,
    /// Reviewer requested changes
    ChangesRequested,
    /// Reviewer left a comment without a verdict
    Commented,
    /// Any other state (dismissed, pending, ...)
    Other,
}

/// A review on a pull request; only the state matters for gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review verdict
    pub state: ReviewState,
}

/// Author identity inside a serialized conflict report
///
/// Field names follow the published output contract, which uses camelCase
/// for `avatarUrl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictAuthor {
    /// Account login
    pub login: String,
    /// Profile URL
    pub url: String,
    /// Avatar image URL
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
}

/// Report emitted for a PR that cannot be updated because of conflicts
///
/// Serializes to `{"title": ..., "url": ..., "user": {"login": ..., "url":
/// ..., "avatarUrl": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictReport {
    /// PR title
    pub title: String,
    /// PR web URL
    pub url: String,
    /// PR author
    pub user: ConflictAuthor,
}

impl ConflictReport {
    /// Build a report from resolved PR details
    pub fn from_details(details: &PullRequestDetails) -> Self {
        Self {
            title: details.title.clone(),
            url: details.html_url.clone(),
            user: ConflictAuthor {
                login: details.author.login.clone(),
                url: details.author.html_url.clone(),
                avatar_url: details.author.avatar_url.clone(),
            },
        }
    }
}

/// Repository coordinates and API host for the platform client
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// API base URL (e.g. "https://api.github.com")
    pub api_base: String,
}
