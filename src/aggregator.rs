//! Aggregation pipeline
//!
//! Two-level fan-out over the configured repositories: every repository's
//! open pull requests are fetched concurrently, and within each repository
//! every pull request's reviews are fetched concurrently. Results are
//! flattened and grouped by repository name.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::error;

use crate::error::AggregatorError;
use crate::github::types::PullRequest;
use crate::github::PullRequestSource;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// One open pull request, enriched with its age and approval count.
/// Built per request and discarded after the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestSummary {
    pub repository: String,
    pub title: String,
    pub number: u64,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub days_open: i64,
    pub approvals: u64,
}

/// Collect the open non-draft pull requests of every configured repository,
/// grouped by repository name in first-seen order.
///
/// A repository whose fetch fails is logged and left out of the mapping, so
/// one bad repository never aborts the aggregation. The output cannot
/// distinguish a failed repository from one with zero open pull requests;
/// the cause is only visible in the server log.
pub async fn aggregate_open_prs<S: PullRequestSource>(
    source: &S,
    org: &str,
    repositories: &[String],
) -> Result<IndexMap<String, Vec<PullRequestSummary>>, AggregatorError> {
    let fetches = repositories
        .iter()
        .map(|repo| summaries_for_repo(source, org, repo));
    let results = join_all(fetches).await;

    let mut flattened = Vec::new();
    for (repo, result) in repositories.iter().zip(results) {
        match result {
            Ok(summaries) => flattened.extend(summaries),
            Err(e) => error!("Failed to fetch open PRs for {}: {}", repo, e),
        }
    }

    let mut grouped: IndexMap<String, Vec<PullRequestSummary>> = IndexMap::new();
    for summary in flattened {
        grouped
            .entry(summary.repository.clone())
            .or_default()
            .push(summary);
    }

    Ok(grouped)
}

/// Summaries for one repository, in upstream listing order with drafts
/// removed. A failed review fetch fails the whole repository: the
/// per-repository catch in [`aggregate_open_prs`] is the only isolation
/// boundary.
async fn summaries_for_repo<S: PullRequestSource>(
    source: &S,
    org: &str,
    repo: &str,
) -> Result<Vec<PullRequestSummary>, AggregatorError> {
    let pulls = source.list_open_pull_requests(org, repo).await?;
    let now = Utc::now();

    let fetches = pulls
        .iter()
        .filter(|pull| !pull.draft)
        .map(|pull| summarize(source, org, repo, pull, now));

    join_all(fetches).await.into_iter().collect()
}

async fn summarize<S: PullRequestSource>(
    source: &S,
    org: &str,
    repo: &str,
    pull: &PullRequest,
    now: DateTime<Utc>,
) -> Result<PullRequestSummary, AggregatorError> {
    let reviews = source.list_reviews(org, repo, pull.number).await?;
    let approvals = reviews.iter().filter(|r| r.state == "APPROVED").count() as u64;

    Ok(PullRequestSummary {
        repository: repo.to_string(),
        title: pull.title.clone(),
        number: pull.number,
        author: pull.user.login.clone(),
        created_at: pull.created_at,
        days_open: days_open(pull.created_at, now),
        approvals,
    })
}

/// Whole days a pull request has been open: the millisecond difference
/// floored to days. A creation time in the future (clock skew) yields a
/// negative count; it is not clamped.
fn days_open(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}
