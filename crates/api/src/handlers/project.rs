//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use storyforge_core::stats::summarize;
use storyforge_core::types::{DbId, Timestamp};
use storyforge_core::validation::validate_name;
use storyforge_db::models::character::Character;
use storyforge_db::models::compilation::Compilation;
use storyforge_db::models::object::StoryObject;
use storyforge_db::models::project::{CreateProject, Project, ProjectWithStats, UpdateProject};
use storyforge_db::models::scene::Scene;
use storyforge_db::models::shot::Shot;
use storyforge_db::models::world::World;
use storyforge_db::repositories::{
    CharacterRepo, CompilationRepo, ObjectRepo, ProjectRepo, SceneRepo, ShotRepo, WorldRepo,
};
use storyforge_db::DbPool;

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Attach entity counts and production statistics to a project.
async fn with_stats(pool: &DbPool, project: Project) -> AppResult<ProjectWithStats> {
    let counts = ProjectRepo::counts(pool, project.id).await?;
    let progress = ShotRepo::progress_for_project(pool, project.id).await?;
    Ok(ProjectWithStats {
        project,
        counts,
        stats: summarize(&progress),
    })
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_name("name", &input.name)?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
///
/// Most recently updated first, each with its statistics.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectWithStats>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    let mut out = Vec::with_capacity(projects.len());
    for project in projects {
        out.push(with_stats(&state.pool, project).await?);
    }
    Ok(Json(out))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithStats>> {
    let project = ensure_project(&state, id).await?;
    Ok(Json(with_stats(&state.pool, project).await?))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Removes every world, character, object, scene, shot and compilation the
/// project owns.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Everything a project owns, as one document.
#[derive(Debug, Serialize)]
pub struct ProjectExport {
    pub project: ProjectWithStats,
    pub worlds: Vec<World>,
    pub characters: Vec<Character>,
    pub objects: Vec<StoryObject>,
    pub scenes: Vec<Scene>,
    pub shots: Vec<Shot>,
    pub compilations: Vec<Compilation>,
    pub exported_at: Timestamp,
}

/// GET /api/projects/{id}/export
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectExport>> {
    let project = ensure_project(&state, id).await?;
    let pool = &state.pool;

    let export = ProjectExport {
        project: with_stats(pool, project).await?,
        worlds: WorldRepo::list_by_project(pool, id).await?,
        characters: CharacterRepo::list_by_project(pool, id).await?,
        objects: ObjectRepo::list_by_project(pool, id).await?,
        scenes: SceneRepo::list_by_project(pool, id).await?,
        shots: ShotRepo::list_by_project(pool, id).await?,
        compilations: CompilationRepo::list_by_project(pool, id, None).await?,
        exported_at: Utc::now(),
    };
    tracing::debug!(project_id = %id, shots = export.shots.len(), "Project exported");
    Ok(Json(export))
}
