use std::env;

use crate::error::AggregatorError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: String,
    pub organization: String,
    pub repositories: Vec<String>,
    pub server_port: u16,
}

impl AppConfig {
    pub fn load() -> Result<Self, AggregatorError> {
        let github_token = require_env("GITHUB_PAT")?;
        let organization = require_env("GITHUB_ORG")?;

        let repositories = parse_repo_list(&require_env("REPO_LIST")?);
        if repositories.is_empty() {
            return Err(AggregatorError::ConfigError(
                "REPO_LIST must contain at least one repository name".to_string(),
            ));
        }

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| AggregatorError::ConfigError(format!("Invalid PORT value: {}", e)))?;

        Ok(AppConfig {
            github_token,
            organization,
            repositories,
            server_port,
        })
    }
}

fn require_env(name: &str) -> Result<String, AggregatorError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AggregatorError::ConfigError(format!(
            "Missing required environment variable: {}",
            name
        ))),
    }
}

fn parse_repo_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|repo| !repo.is_empty())
        .map(str::to_string)
        .collect()
}
