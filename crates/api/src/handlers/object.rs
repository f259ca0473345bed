//! Handlers for story objects (props) nested under projects:
//! `/projects/{project_id}/objects[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::types::DbId;
use storyforge_core::validation::validate_name;
use storyforge_db::models::object::{CreateStoryObject, StoryObject, UpdateStoryObject};
use storyforge_db::repositories::{ObjectRepo, ProjectRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/projects/{project_id}/objects
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateStoryObject>,
) -> AppResult<(StatusCode, Json<StoryObject>)> {
    ensure_project(&state, project_id).await?;
    validate_name("name", &input.name)?;

    let object = ObjectRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok((StatusCode::CREATED, Json(object)))
}

/// GET /api/projects/{project_id}/objects
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<StoryObject>>> {
    ensure_project(&state, project_id).await?;
    let objects = ObjectRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(objects))
}

/// GET /api/projects/{project_id}/objects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<StoryObject>> {
    ensure_project(&state, project_id).await?;
    let object = ObjectRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("Object", id))?;
    Ok(Json(object))
}

/// PUT /api/projects/{project_id}/objects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateStoryObject>,
) -> AppResult<Json<StoryObject>> {
    ensure_project(&state, project_id).await?;
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let object = ObjectRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Object", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(Json(object))
}

/// DELETE /api/projects/{project_id}/objects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, project_id).await?;
    if ObjectRepo::delete(&state.pool, project_id, id).await? {
        ProjectRepo::touch(&state.pool, project_id).await?;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Object", id))
    }
}
