//! GitHub REST client
//!
//! Issues authenticated reads against the GitHub v3 API. No retries, no
//! pagination: only the first page upstream returns is used.

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AggregatorError;
use crate::github::types::{PullRequest, Review};
use crate::github::PullRequestSource;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self, AggregatorError> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Point the client at an alternate API root. Tests use this to target
    /// a local mock server.
    pub fn with_base_url(token: String, base_url: &str) -> Result<Self, AggregatorError> {
        // GitHub rejects requests without a User-Agent.
        let http = reqwest::Client::builder()
            .user_agent(concat!("pr-aggregator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AggregatorError::GitHubError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(GitHubClient {
            http,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AggregatorError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| AggregatorError::GitHubError(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::GitHubError(format!(
                "GitHub returned {} for {}",
                status, url
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AggregatorError::GitHubError(format!("Invalid response body from {}: {}", url, e))
        })
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn list_open_pull_requests(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<PullRequest>, AggregatorError> {
        let url = format!("{}/repos/{}/{}/pulls?state=open", self.base_url, org, repo);
        self.get_json(&url).await
    }

    async fn list_reviews(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, AggregatorError> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_url, org, repo, number
        );
        self.get_json(&url).await
    }
}
