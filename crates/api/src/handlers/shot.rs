//! Handlers for shots nested under projects:
//! `/projects/{project_id}/shots[/{id}]`
//!
//! Besides CRUD this covers the production pipeline (direct status set,
//! single-step advance, batch status) and scene-level reordering.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storyforge_core::error::CoreError;
use storyforge_core::ordering::{next_shot_number, plan_reorder};
use storyforge_core::pipeline::{advance as advance_stage, validate_status, ProductionStage};
use storyforge_core::types::DbId;
use storyforge_core::validation::{validate_duration, validate_order_key};
use storyforge_core::vocabulary::{
    validate_camera_movement, validate_framing, validate_opt, validate_transition,
};
use storyforge_db::models::shot::{CreateShot, Shot, UpdateShot};
use storyforge_db::repositories::{ProjectRepo, SceneRepo, ShotRepo};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::query::{SceneFilterParams, StatusParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Optional shot fields that carry a constrained value.
struct ShotFieldRefs<'a> {
    shot_number: Option<i32>,
    duration_target_sec: Option<f64>,
    framing: Option<&'a str>,
    camera_movement: Option<&'a str>,
    production_status: Option<&'a str>,
    transition_in: Option<&'a str>,
    transition_out: Option<&'a str>,
}

fn validate_shot_fields(fields: ShotFieldRefs<'_>) -> Result<(), CoreError> {
    if let Some(number) = fields.shot_number {
        validate_order_key("shot_number", number)?;
    }
    if let Some(secs) = fields.duration_target_sec {
        validate_duration(secs)?;
    }
    validate_opt(fields.framing, validate_framing)?;
    validate_opt(fields.camera_movement, validate_camera_movement)?;
    if let Some(status) = fields.production_status {
        validate_status(status)?;
    }
    validate_opt(fields.transition_in, |t| validate_transition("transition_in", t))?;
    validate_opt(fields.transition_out, |t| validate_transition("transition_out", t))?;
    Ok(())
}

/// A shot may only point at a scene of its own project.
async fn ensure_scene_in_project(
    state: &AppState,
    project_id: DbId,
    scene_id: DbId,
) -> AppResult<()> {
    match SceneRepo::find_by_id(&state.pool, project_id, scene_id).await? {
        Some(_) => Ok(()),
        None => Err(CoreError::Validation(format!(
            "scene {scene_id} does not belong to this project"
        ))
        .into()),
    }
}

async fn find_shot(state: &AppState, project_id: DbId, id: DbId) -> AppResult<Shot> {
    ShotRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::not_found("Shot", id))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/projects/{project_id}/shots
///
/// Without `shot_number` the shot is appended to the project timeline.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateShot>,
) -> AppResult<(StatusCode, Json<Shot>)> {
    ensure_project(&state, project_id).await?;
    validate_shot_fields(ShotFieldRefs {
        shot_number: input.shot_number,
        duration_target_sec: input.duration_target_sec,
        framing: input.framing.as_deref(),
        camera_movement: input.camera_movement.as_deref(),
        production_status: input.production_status.as_deref(),
        transition_in: input.transition_in.as_deref(),
        transition_out: input.transition_out.as_deref(),
    })?;
    ensure_scene_in_project(&state, project_id, input.scene_id).await?;

    let shot_number = match input.shot_number {
        Some(number) => number,
        None => next_shot_number(ShotRepo::shot_numbers(&state.pool, project_id).await?)?,
    };
    let input = CreateShot {
        shot_number: Some(shot_number),
        ..input
    };
    let shot = ShotRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(
        shot_id = %shot.id,
        %project_id,
        shot_number = shot.shot_number,
        "Shot created",
    );
    Ok((StatusCode::CREATED, Json(shot)))
}

/// GET /api/projects/{project_id}/shots[?scene_id=]
///
/// Ordered by `shot_number`.
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<SceneFilterParams>,
) -> AppResult<Json<Vec<Shot>>> {
    ensure_project(&state, project_id).await?;
    let shots = match params.scene_id {
        Some(scene_id) => ShotRepo::list_by_scene(&state.pool, project_id, scene_id).await?,
        None => ShotRepo::list_by_project(&state.pool, project_id).await?,
    };
    Ok(Json(shots))
}

/// GET /api/projects/{project_id}/shots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Shot>> {
    ensure_project(&state, project_id).await?;
    Ok(Json(find_shot(&state, project_id, id).await?))
}

/// PUT /api/projects/{project_id}/shots/{id}
///
/// Applies whichever fields are present; an empty body returns the shot
/// unchanged.
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateShot>,
) -> AppResult<Json<Shot>> {
    ensure_project(&state, project_id).await?;
    let current = find_shot(&state, project_id, id).await?;
    if input.is_empty() {
        return Ok(Json(current));
    }

    validate_shot_fields(ShotFieldRefs {
        shot_number: input.shot_number,
        duration_target_sec: input.duration_target_sec,
        framing: input.framing.as_deref(),
        camera_movement: input.camera_movement.as_deref(),
        production_status: input.production_status.as_deref(),
        transition_in: input.transition_in.as_deref(),
        transition_out: input.transition_out.as_deref(),
    })?;
    if let Some(scene_id) = input.scene_id {
        ensure_scene_in_project(&state, project_id, scene_id).await?;
    }

    let shot = ShotRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Shot", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    Ok(Json(shot))
}

/// DELETE /api/projects/{project_id}/shots/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, project_id).await?;
    if ShotRepo::delete(&state.pool, project_id, id).await? {
        ProjectRepo::touch(&state.pool, project_id).await?;
        tracing::info!(shot_id = %id, %project_id, "Shot deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Shot", id))
    }
}

// ---------------------------------------------------------------------------
// Production pipeline
// ---------------------------------------------------------------------------

/// PATCH /api/projects/{project_id}/shots/{id}/status?status=
///
/// Sets any stage directly, forwards or backwards.
pub async fn set_status(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Query(params): Query<StatusParams>,
) -> AppResult<Json<Shot>> {
    ensure_project(&state, project_id).await?;
    let stage = validate_status(&params.status)?;
    let shot = ShotRepo::set_status(&state.pool, project_id, id, stage)
        .await?
        .ok_or(AppError::not_found("Shot", id))?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(shot_id = %id, status = %stage, "Shot status set");
    Ok(Json(shot))
}

/// Response for a single-step advance.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub advanced: bool,
    pub from: ProductionStage,
    pub to: ProductionStage,
    pub shot: Shot,
}

/// POST /api/projects/{project_id}/shots/{id}/advance
///
/// Moves the shot one stage forward. A shot at `final` is returned as-is
/// with `advanced: false`.
pub async fn advance(
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<AdvanceResponse>> {
    ensure_project(&state, project_id).await?;
    let shot = find_shot(&state, project_id, id).await?;
    let current = ProductionStage::from_str_value(&shot.production_status)?;
    let step = advance_stage(current);

    let shot = if step.advanced {
        let updated = ShotRepo::set_status(&state.pool, project_id, id, step.to)
            .await?
            .ok_or(AppError::not_found("Shot", id))?;
        ProjectRepo::touch(&state.pool, project_id).await?;
        tracing::info!(shot_id = %id, from = %step.from, to = %step.to, "Shot advanced");
        updated
    } else {
        shot
    };

    Ok(Json(AdvanceResponse {
        advanced: step.advanced,
        from: step.from,
        to: step.to,
        shot,
    }))
}

/// Request body for a batch status update.
#[derive(Debug, Deserialize)]
pub struct BatchStatusRequest {
    pub shot_ids: Vec<DbId>,
    pub status: String,
}

/// Response for a batch status update.
#[derive(Debug, Serialize)]
pub struct BatchStatusResponse {
    pub updated: u64,
    pub status: ProductionStage,
}

/// POST /api/projects/{project_id}/shots/batch-status
///
/// Every id must exist in the project; the update is all-or-nothing.
pub async fn batch_status(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<BatchStatusRequest>,
) -> AppResult<Json<BatchStatusResponse>> {
    ensure_project(&state, project_id).await?;
    if input.shot_ids.is_empty() {
        return Err(AppError::BadRequest("shot_ids must not be empty".to_string()));
    }
    let stage = validate_status(&input.status)?;

    let shots = ShotRepo::list_by_project(&state.pool, project_id).await?;
    if let Some(missing) = input
        .shot_ids
        .iter()
        .find(|id| !shots.iter().any(|s| s.id == **id))
    {
        return Err(AppError::not_found("Shot", *missing));
    }

    let updated = ShotRepo::batch_set_status(&state.pool, project_id, &input.shot_ids, stage).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(%project_id, updated, status = %stage, "Batch status applied");
    Ok(Json(BatchStatusResponse {
        updated,
        status: stage,
    }))
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Request body for a scene reorder: every shot of one scene, in the new
/// order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub shot_ids: Vec<DbId>,
}

/// POST /api/projects/{project_id}/shots/reorder
///
/// Returns the scene's shots in their new order.
pub async fn reorder(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<Vec<Shot>>> {
    ensure_project(&state, project_id).await?;

    let slots: Vec<_> = ShotRepo::list_by_project(&state.pool, project_id)
        .await?
        .iter()
        .map(Shot::slot)
        .collect();
    let plan = plan_reorder(&slots, &input.shot_ids)?;

    ShotRepo::apply_reorder(&state.pool, project_id, &plan).await?;
    ProjectRepo::touch(&state.pool, project_id).await?;
    tracing::info!(
        %project_id,
        scene_id = %plan.scene_id,
        shots = plan.assignments.len(),
        "Shots reordered",
    );

    let shots = ShotRepo::list_by_scene(&state.pool, project_id, plan.scene_id).await?;
    Ok(Json(shots))
}
