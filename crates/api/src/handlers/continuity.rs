//! Continuity chain across the project timeline.

use axum::extract::{Path, State};
use axum::Json;
use storyforge_core::ordering::{continuity_chain, ContinuityLink};
use storyforge_core::types::DbId;
use storyforge_db::models::shot::Shot;
use storyforge_db::repositories::ShotRepo;

use super::ensure_project;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/projects/{project_id}/continuity
///
/// One link per shot in `shot_number` order, naming its neighbours and the
/// frames that must match across each cut.
pub async fn chain(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ContinuityLink>>> {
    ensure_project(&state, project_id).await?;
    let shots: Vec<_> = ShotRepo::list_by_project(&state.pool, project_id)
        .await?
        .iter()
        .map(Shot::continuity)
        .collect();
    Ok(Json(continuity_chain(&shots)))
}
