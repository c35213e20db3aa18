use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pr_aggregator::config::AppConfig;
use pr_aggregator::github::GitHubClient;
use pr_aggregator::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pr_aggregator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PR aggregation service");

    // Load configuration; missing credentials abort before we serve traffic
    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: {} repositories in {}",
        config.repositories.len(),
        config.organization
    );

    let client = GitHubClient::new(config.github_token.clone())?;

    let app = routes::app(config.clone(), client);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
