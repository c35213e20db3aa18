use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::aggregator;
use crate::config::AppConfig;
use crate::github::GitHubClient;

/// Build the application router. Kept out of `main` so integration tests
/// can drive it directly.
pub fn app(config: AppConfig, client: GitHubClient) -> Router {
    Router::new()
        .route("/open-prs", get(open_prs))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state((config, client))
}

async fn open_prs(State((config, client)): State<(AppConfig, GitHubClient)>) -> Response {
    match aggregator::aggregate_open_prs(&client, &config.organization, &config.repositories).await
    {
        Ok(grouped) => (StatusCode::OK, Json(grouped)).into_response(),
        Err(e) => {
            error!("Failed to aggregate open PRs: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch PR data"})),
            )
                .into_response()
        }
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "pr-aggregator",
        "timestamp": chrono::Utc::now()
    }))
}
