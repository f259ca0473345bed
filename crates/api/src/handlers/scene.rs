//! Handlers for scenes nested under projects:
//! `/projects/{project_id}/scenes[/{id}]`
//!
//! Scenes reference a world and a cast by id; both must belong to the same
//! project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::error::CoreError;
use storyforge_core::types::DbId;
use storyforge_core::validation::{validate_dramatic_tension, validate_name, validate_order_key};
use storyforge_core::vocabulary::{validate_emotional_zone, validate_opt};
use storyforge_db::models::scene::{CreateScene, Scene, SceneWithShotCount, UpdateScene};
use storyforge_db::repositories::{CharacterRepo, ProjectRepo, SceneRepo, WorldRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reject a world or cast member that is not part of `project_id`.
async fn validate_references(
    state: &AppState,
    project_id: DbId,
    world_id: Option<DbId>,
    character_ids: Option<&[DbId]>,
) -> AppResult<()> {
    if let Some(world_id) = world_id {
        if WorldRepo::find_by_id(&state.pool, project_id, world_id)
            .await?
            .is_none()
        {
            return Err(CoreError::Validation(format!(
                "world {world_id} does not belong to this project"
            ))
            .into());
        }
    }

    if let Some(ids) = character_ids {
        let found = CharacterRepo::list_by_ids(&state.pool, project_id, ids).await?;
        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|c| c.id == **id)) {
            return Err(CoreError::Validation(format!(
                "character {missing} does not belong to this project"
            ))
            .into());
        }
    }

    Ok(())
}

/// POST /api/projects/{project_id}/scenes
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateScene>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    ensure_project(&state, project_id).await?;
    validate_order_key("scene_number", input.scene_number)?;
    validate_name("title", &input.title)?;
    validate_opt(input.emotional_zone.as_deref(), validate_emotional_zone)?;
    if let Some(tension) = input.dramatic_tension {
        validate_dramatic_tension(tension)?;
    }
    validate_references(
        &state,
        project_id,
        input.world_id,
        input.character_ids.as_deref(),
    )
    .await?;

    let scene = SceneRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(
        scene_id = %scene.id,
        %project_id,
        scene_number = scene.scene_number,
        "Scene created",
    );
    Ok((StatusCode::CREATED, Json(scene)))
}

/// GET /api/projects/{project_id}/scenes
///
/// Ordered by `scene_number`, each with its `shot_count`.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<SceneWithShotCount>>> {
    ensure_project(&state, project_id).await?;
    let scenes = SceneRepo::list_with_shot_counts(&state.pool, project_id).await?;
    Ok(Json(scenes))
}

/// GET /api/projects/{project_id}/scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Scene>> {
    ensure_project(&state, project_id).await?;
    let scene = SceneRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("Scene", id))?;
    Ok(Json(scene))
}

/// PUT /api/projects/{project_id}/scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateScene>,
) -> AppResult<Json<Scene>> {
    ensure_project(&state, project_id).await?;
    SceneRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("Scene", id))?;
    if let Some(number) = input.scene_number {
        validate_order_key("scene_number", number)?;
    }
    if let Some(title) = &input.title {
        validate_name("title", title)?;
    }
    validate_opt(input.emotional_zone.as_deref(), validate_emotional_zone)?;
    if let Some(tension) = input.dramatic_tension {
        validate_dramatic_tension(tension)?;
    }
    validate_references(
        &state,
        project_id,
        input.world_id,
        input.character_ids.as_deref(),
    )
    .await?;

    let scene = SceneRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Scene", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(Json(scene))
}

/// DELETE /api/projects/{project_id}/scenes/{id}
///
/// Deletes the scene's shots with it.
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, project_id).await?;
    if SceneRepo::delete(&state.pool, project_id, id).await? {
        ProjectRepo::touch(&state.pool, project_id).await?;
        tracing::info!(scene_id = %id, %project_id, "Scene deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Scene", id))
    }
}
