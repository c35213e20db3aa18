pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::AggregatorError;
use types::{PullRequest, Review};

pub use client::GitHubClient;

/// Read-only view of the GitHub pull request API. The trait seam lets the
/// aggregation pipeline run against an in-memory fake in tests.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// First page of open pull requests for a repository.
    async fn list_open_pull_requests(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<PullRequest>, AggregatorError>;

    /// First page of reviews for a pull request.
    async fn list_reviews(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, AggregatorError>;
}
