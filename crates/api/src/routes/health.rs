//! Liveness probe, mounted at `/health` and `/api/health`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when SQLite does not answer.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `LLM_API_KEY` is set. A key stored under `/secrets` is not checked.
    pub llm_configured: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match storyforge_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: "storyforge",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        llm_configured: state.config.llm.api_key.is_some(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
