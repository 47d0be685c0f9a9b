//! Error types for pr-autoupdate

use thiserror::Error;

/// Errors that can occur while running the update step
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be resolved from the environment
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform failure (used by alternative implementations and tests)
    #[error("platform error: {0}")]
    Platform(String),

    /// The platform never resolved a PR's mergeable status within the attempt cap
    #[error("mergeable status for PR #{number} did not resolve after {attempts} attempts")]
    MergeableNeverResolved {
        /// PR number whose status stayed pending
        number: u64,
        /// Number of detail fetches issued before giving up
        attempts: u32,
    },

    /// Step output could not be written
    #[error("failed to write step output: {0}")]
    Output(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
