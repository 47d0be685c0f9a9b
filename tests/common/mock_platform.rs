//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_autoupdate::error::{Error, Result};
use pr_autoupdate::platform::PlatformService;
use pr_autoupdate::types::{
    Author, PlatformConfig, PullRequestDetails, PullRequestSummary, Review, ReviewState,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using a mocking
/// crate, so detail fetches can be scripted as per-PR response sequences
/// (for exercising the mergeability poller).
///
/// Features:
/// - Scripted list response and per-PR detail sequences (last entry sticky)
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    list_response: Mutex<Vec<PullRequestSummary>>,
    details_sequences: Mutex<HashMap<u64, VecDeque<PullRequestDetails>>>,
    reviews_responses: Mutex<HashMap<u64, Vec<Review>>>,
    // Call tracking
    list_calls: Mutex<Vec<String>>,
    details_calls: Mutex<Vec<u64>>,
    reviews_calls: Mutex<Vec<u64>>,
    update_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_details: Mutex<Option<String>>,
    error_on_update: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            list_response: Mutex::new(Vec::new()),
            details_sequences: Mutex::new(HashMap::new()),
            reviews_responses: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            details_calls: Mutex::new(Vec::new()),
            reviews_calls: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_details: Mutex::new(None),
            error_on_update: Mutex::new(None),
        }
    }

    // === Response configuration ===

    /// Set the PRs returned by `list_open_prs`
    pub fn set_list_response(&self, prs: Vec<PullRequestSummary>) {
        *self.list_response.lock().unwrap() = prs;
    }

    /// Set a single sticky `get_pr_details` response for a PR
    pub fn set_details_response(&self, pr_number: u64, details: PullRequestDetails) {
        self.set_details_sequence(pr_number, vec![details]);
    }

    /// Script a sequence of `get_pr_details` responses for a PR
    ///
    /// Each fetch consumes the next entry; the final entry is returned for
    /// every fetch after the sequence is exhausted.
    pub fn set_details_sequence(&self, pr_number: u64, sequence: Vec<PullRequestDetails>) {
        self.details_sequences
            .lock()
            .unwrap()
            .insert(pr_number, sequence.into());
    }

    /// Set the reviews returned by `list_reviews` for a PR
    pub fn set_reviews_response(&self, pr_number: u64, reviews: Vec<Review>) {
        self.reviews_responses
            .lock()
            .unwrap()
            .insert(pr_number, reviews);
    }

    // === Scenario helpers ===

    /// Set up a PR that is listed with auto-merge enabled and resolves as
    /// cleanly mergeable
    pub fn setup_mergeable_pr(&self, pr_number: u64, title: &str) {
        self.push_listed_pr(pr_number, true);
        self.set_details_response(pr_number, make_details(pr_number, title, Some(true)));
    }

    /// Set up a PR that is listed with auto-merge enabled and resolves as
    /// conflicted
    pub fn setup_conflicted_pr(&self, pr_number: u64, title: &str) {
        self.push_listed_pr(pr_number, true);
        self.set_details_response(pr_number, make_details(pr_number, title, Some(false)));
    }

    /// Set up a PR whose mergeable status stays pending for `pending_fetches`
    /// fetches before resolving
    pub fn setup_pending_pr(
        &self,
        pr_number: u64,
        title: &str,
        pending_fetches: usize,
        resolves_to: bool,
    ) {
        self.push_listed_pr(pr_number, true);
        let mut sequence = vec![make_details(pr_number, title, None); pending_fetches];
        sequence.push(make_details(pr_number, title, Some(resolves_to)));
        self.set_details_sequence(pr_number, sequence);
    }

    /// Set up a PR whose mergeable status never resolves
    pub fn setup_never_resolving_pr(&self, pr_number: u64, title: &str) {
        self.push_listed_pr(pr_number, true);
        self.set_details_response(pr_number, make_details(pr_number, title, None));
    }

    /// Add a PR to the list response without configuring details
    pub fn push_listed_pr(&self, pr_number: u64, auto_merge_enabled: bool) {
        self.list_response
            .lock()
            .unwrap()
            .push(PullRequestSummary {
                number: pr_number,
                head_label: format!("test:feature-{pr_number}"),
                auto_merge_enabled,
            });
    }

    /// Give a PR `approved` approving reviews plus one changes-requested
    /// review
    pub fn setup_reviews(&self, pr_number: u64, approved: usize) {
        let mut reviews = vec![
            Review {
                state: ReviewState::Approved,
            };
            approved
        ];
        reviews.push(Review {
            state: ReviewState::ChangesRequested,
        });
        self.set_reviews_response(pr_number, reviews);
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pr_details` return an error
    pub fn fail_details(&self, msg: &str) {
        *self.error_on_details.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_branch` return an error
    pub fn fail_update(&self, msg: &str) {
        *self.error_on_update.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Get all base branches `list_open_prs` was called with
    pub fn get_list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Get all PR numbers `get_pr_details` was called with, in order
    pub fn get_details_calls(&self) -> Vec<u64> {
        self.details_calls.lock().unwrap().clone()
    }

    /// Count `get_pr_details` calls for one PR
    pub fn details_call_count(&self, pr_number: u64) -> usize {
        self.details_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|n| **n == pr_number)
            .count()
    }

    /// Get all PR numbers `list_reviews` was called with
    pub fn get_reviews_calls(&self) -> Vec<u64> {
        self.reviews_calls.lock().unwrap().clone()
    }

    /// Get all PR numbers `update_branch` was called with, in order
    pub fn get_update_calls(&self) -> Vec<u64> {
        self.update_calls.lock().unwrap().clone()
    }

    /// Count of `update_branch` calls across all PRs
    pub fn update_call_count(&self) -> usize {
        self.update_calls.lock().unwrap().len()
    }

    /// Assert that `update_branch` was called for a specific PR
    pub fn assert_update_called(&self, pr_number: u64) {
        let calls = self.get_update_calls();
        assert!(
            calls.contains(&pr_number),
            "Expected update_branch({pr_number}) but got: {calls:?}"
        );
    }

    /// Assert that `update_branch` was NOT called for a specific PR
    pub fn assert_update_not_called(&self, pr_number: u64) {
        let calls = self.get_update_calls();
        assert!(
            !calls.contains(&pr_number),
            "Expected update_branch({pr_number}) NOT to be called but it was: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self, base_branch: &str) -> Result<Vec<PullRequestSummary>> {
        self.list_calls
            .lock()
            .unwrap()
            .push(base_branch.to_string());

        // Check for injected error
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.list_response.lock().unwrap().clone())
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.details_calls.lock().unwrap().push(pr_number);

        // Check for injected error
        if let Some(msg) = self.error_on_details.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let mut sequences = self.details_sequences.lock().unwrap();
        let sequence = sequences.get_mut(&pr_number).ok_or_else(|| {
            Error::Platform(format!(
                "get_pr_details: no response configured for PR #{pr_number}"
            ))
        })?;

        // Consume the sequence but keep the last entry sticky.
        if sequence.len() > 1 {
            Ok(sequence.pop_front().expect("sequence is non-empty"))
        } else {
            sequence.front().cloned().ok_or_else(|| {
                Error::Platform(format!(
                    "get_pr_details: empty response sequence for PR #{pr_number}"
                ))
            })
        }
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.reviews_calls.lock().unwrap().push(pr_number);

        let responses = self.reviews_responses.lock().unwrap();
        Ok(responses.get(&pr_number).cloned().unwrap_or_default())
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        self.update_calls.lock().unwrap().push(pr_number);

        // Check for injected error
        if let Some(msg) = self.error_on_update.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// Build PR details with a given mergeable status
pub fn make_details(pr_number: u64, title: &str, mergeable: Option<bool>) -> PullRequestDetails {
    PullRequestDetails {
        number: pr_number,
        title: title.to_string(),
        html_url: format!("https://github.com/test/repo/pull/{pr_number}"),
        mergeable,
        author: Author {
            login: "octocat".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/1".to_string(),
        },
    }
}
