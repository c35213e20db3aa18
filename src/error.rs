use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("GitHub API error: {0}")]
    GitHubError(String),
}
