//! Handlers for characters nested under projects:
//! `/projects/{project_id}/characters[/{id}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::types::DbId;
use storyforge_core::validation::validate_name;
use storyforge_db::models::character::{Character, CreateCharacter, UpdateCharacter};
use storyforge_db::repositories::{CharacterRepo, ProjectRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/projects/{project_id}/characters
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<Character>)> {
    ensure_project(&state, project_id).await?;
    validate_name("name", &input.name)?;

    let character = CharacterRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(character_id = %character.id, %project_id, "Character created");
    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /api/projects/{project_id}/characters
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Character>>> {
    ensure_project(&state, project_id).await?;
    let characters = CharacterRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(characters))
}

/// GET /api/projects/{project_id}/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Character>> {
    ensure_project(&state, project_id).await?;
    let character = CharacterRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("Character", id))?;
    Ok(Json(character))
}

/// PUT /api/projects/{project_id}/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<Character>> {
    ensure_project(&state, project_id).await?;
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let character = CharacterRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Character", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(Json(character))
}

/// DELETE /api/projects/{project_id}/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, project_id).await?;
    if CharacterRepo::delete(&state.pool, project_id, id).await? {
        ProjectRepo::touch(&state.pool, project_id).await?;
        tracing::info!(character_id = %id, %project_id, "Character deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Character", id))
    }
}
