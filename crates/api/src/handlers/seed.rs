use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storyforge_db::seed::{seed_example_project, SeedOutcome};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/seed/mito
///
/// 201 when the example project is created, 200 when it already exists.
pub async fn seed_mito(State(state): State<AppState>) -> AppResult<(StatusCode, Json<SeedOutcome>)> {
    let outcome = seed_example_project(&state.pool).await?;
    let status = match outcome {
        SeedOutcome::Seeded { .. } => StatusCode::CREATED,
        SeedOutcome::AlreadySeeded { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}
