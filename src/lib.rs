//! pr-autoupdate - keep auto-merge pull requests up to date with their base
//! branch
//!
//! A CI step that lists open PRs targeting the pushed-to branch, filters to
//! those with auto-merge enabled, waits for each one's mergeable status to
//! resolve, optionally gates on a minimum approval count, then either
//! triggers the platform's update-branch operation or records the PR as
//! conflicted in the step outputs.

pub mod config;
pub mod error;
pub mod outputs;
pub mod platform;
pub mod types;
pub mod update;

pub use error::{Error, Result};
