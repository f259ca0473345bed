//! Handlers for worlds nested under projects:
//! `/projects/{project_id}/worlds[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::types::DbId;
use storyforge_core::validation::validate_name;
use storyforge_core::vocabulary::{validate_emotional_zone, validate_opt};
use storyforge_db::models::world::{CreateWorld, UpdateWorld, World};
use storyforge_db::repositories::{ProjectRepo, WorldRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/projects/{project_id}/worlds
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateWorld>,
) -> AppResult<(StatusCode, Json<World>)> {
    ensure_project(&state, project_id).await?;
    validate_name("name", &input.name)?;
    validate_opt(input.emotional_zone.as_deref(), validate_emotional_zone)?;

    let world = WorldRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(world_id = %world.id, %project_id, "World created");
    Ok((StatusCode::CREATED, Json(world)))
}

/// GET /api/projects/{project_id}/worlds
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<World>>> {
    ensure_project(&state, project_id).await?;
    let worlds = WorldRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(worlds))
}

/// GET /api/projects/{project_id}/worlds/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<World>> {
    ensure_project(&state, project_id).await?;
    let world = WorldRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("World", id))?;
    Ok(Json(world))
}

/// PUT /api/projects/{project_id}/worlds/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateWorld>,
) -> AppResult<Json<World>> {
    ensure_project(&state, project_id).await?;
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    validate_opt(input.emotional_zone.as_deref(), validate_emotional_zone)?;

    let world = WorldRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::not_found("World", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(Json(world))
}

/// DELETE /api/projects/{project_id}/worlds/{id}
///
/// Scenes set in this world keep existing with no world.
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, project_id).await?;
    if WorldRepo::delete(&state.pool, project_id, id).await? {
        ProjectRepo::touch(&state.pool, project_id).await?;
        tracing::info!(world_id = %id, %project_id, "World deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("World", id))
    }
}
