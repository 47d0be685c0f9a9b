//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    Author, PlatformConfig, PullRequestDetails, PullRequestSummary, Review, ReviewState,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.github.com";

// Wire types for the raw list endpoint. octocrab's PR model does not carry
// the auto_merge settings object, so listing goes through reqwest directly.

#[derive(Deserialize)]
struct ListedPullRequest {
    number: u64,
    head: HeadRef,
    auto_merge: Option<AutoMergeSettings>,
}

#[derive(Deserialize)]
struct HeadRef {
    label: String,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct AutoMergeSettings {
    merge_method: Option<String>,
}

/// GitHub service using octocrab
///
/// Uses octocrab for the endpoints it models (detail fetch, review listing)
/// and a raw HTTP client for the ones it does not (list with auto-merge
/// settings, update-branch).
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, api_base: String) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if api_base != DEFAULT_API_BASE {
            builder = builder
                .base_uri(&api_base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("pr-autoupdate")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_base,
            },
            token: token.to_string(),
            http_client,
        })
    }

    fn authorized_get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self, base_branch: &str) -> Result<Vec<PullRequestSummary>> {
        debug!(base_branch, "listing open PRs");

        let url = format!(
            "{}/repos/{}/{}/pulls",
            self.config.api_base, self.config.owner, self.config.repo
        );

        let response = self
            .authorized_get(&url)
            .query(&[("base", base_branch), ("state", "open"), ("per_page", "100")])
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to list pull requests: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Listing pull requests returned {}",
                response.status()
            )));
        }

        let listed: Vec<ListedPullRequest> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse pull request list: {e}")))?;

        let result: Vec<PullRequestSummary> = listed
            .into_iter()
            .map(|pr| PullRequestSummary {
                number: pr.number,
                head_label: pr.head.label,
                auto_merge_enabled: pr.auto_merge.is_some(),
            })
            .collect();

        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let author = pr.user.as_ref().map_or_else(Author::default, |u| Author {
            login: u.login.clone(),
            html_url: u.html_url.to_string(),
            avatar_url: u.avatar_url.to_string(),
        });

        let details = PullRequestDetails {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            mergeable: pr.mergeable,
            author,
        };

        debug!(pr_number, mergeable = ?details.mergeable, "got PR details");
        Ok(details)
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        debug!(pr_number, "listing PR reviews");

        let reviews = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list_reviews(pr_number)
            .send()
            .await?;

        let result: Vec<Review> = reviews
            .items
            .into_iter()
            .map(|r| Review {
                state: match r.state {
                    Some(octocrab::models::pulls::ReviewState::Approved) => ReviewState::Approved,
                    Some(octocrab::models::pulls::ReviewState::ChangesRequested) => {
                        ReviewState::ChangesRequested
                    }
                    Some(octocrab::models::pulls::ReviewState::Commented) => ReviewState::Commented,
                    _ => ReviewState::Other,
                },
            })
            .collect();

        debug!(pr_number, count = result.len(), "listed PR reviews");
        Ok(result)
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "updating PR branch");

        // octocrab has no binding for this endpoint, so call it directly.
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/update-branch",
            self.config.api_base, self.config.owner, self.config.repo, pr_number
        );

        let response = self
            .http_client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to update branch: {e}")))?;

        // GitHub answers 202 Accepted when the update is queued.
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Update branch for PR #{pr_number} returned {status}: {body}"
            )));
        }

        debug!(pr_number, "updated PR branch");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
