//! Serde shapes for the GitHub payloads this service reads. Upstream JSON
//! is parsed into these at the client boundary and never passed around
//! untyped.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub state: String,
}
