//! Handlers for the scene compiler, compilation history and image
//! describe.
//!
//! Every compile call is persisted as a [`Compilation`], including replies
//! the model did not format as JSON. Upstream failures surface as 502 and
//! are not recorded.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use storyforge_compiler::describe::EntityKind;
use storyforge_compiler::output::CompileOutput;
use storyforge_compiler::prompt::{
    BrandContext, CharacterContext, CompileContext, ContinuityContext, ShotParameters,
    WorldContext,
};
use storyforge_core::error::CoreError;
use storyforge_core::ordering::{neighbours, Neighbours};
use storyforge_core::types::DbId;
use storyforge_core::vocabulary::{
    validate_camera_movement, validate_emotional_zone, validate_framing, validate_opt,
    DEFAULT_CAMERA_MOVEMENT, DEFAULT_EMOTIONAL_ZONE, DEFAULT_FRAMING, EMOTIONAL_ZONES,
};
use storyforge_db::models::character::Character;
use storyforge_db::models::compilation::{Compilation, CreateCompilation};
use storyforge_db::models::project::Project;
use storyforge_db::models::secret::SECRET_LLM_API_KEY;
use storyforge_db::models::shot::Shot;
use storyforge_db::models::world::World;
use storyforge_db::repositories::{
    CharacterRepo, CompilationRepo, SceneRepo, SecretRepo, ShotRepo, WorldRepo,
};

use super::ensure_project;
use crate::error::{AppError, AppResult};
use crate::query::ShotFilterParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Context assembly
// ---------------------------------------------------------------------------

fn brand_context(project: &Project) -> BrandContext {
    BrandContext {
        project_name: project.name.clone(),
        brand_primary: project.brand_primary.clone(),
        brand_secondary: project.brand_secondary.clone(),
        visual_style: project.visual_style.clone(),
        aspect_ratio: project.default_aspect_ratio.clone(),
        compliance_notes: project.compliance_notes.0.clone(),
        forbidden_elements: project.forbidden_elements.0.clone(),
        required_elements: project.required_elements.0.clone(),
    }
}

fn world_context(world: &World) -> WorldContext {
    WorldContext {
        name: world.name.clone(),
        description: world.description.clone(),
        emotional_zone: world.emotional_zone.clone(),
        atmosphere: world.atmosphere.clone(),
        lighting_notes: world.lighting_notes.clone(),
        spatial_character: world.spatial_character.clone(),
        marble_url: world.marble_url.clone(),
    }
}

fn character_context(character: &Character) -> CharacterContext {
    CharacterContext {
        name: character.name.clone(),
        role: character.role.clone(),
        description: character.description.clone(),
        personality: character.personality.clone(),
        visual_notes: character.visual_notes.clone(),
        voice_profile: character.voice_profile.clone(),
    }
}

/// First non-blank value, else `fallback`.
fn first_non_blank(candidates: &[Option<&str>], fallback: &str) -> String {
    candidates
        .iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .copied()
        .unwrap_or(fallback)
        .to_string()
}

/// Continuity frames: explicit values win, otherwise the neighbours'
/// frames are used.
fn continuity_context(
    explicit_previous: Option<String>,
    explicit_next: Option<String>,
    around: Option<&Neighbours>,
) -> ContinuityContext {
    let non_blank = |url: &str| (!url.trim().is_empty()).then(|| url.to_string());
    ContinuityContext {
        previous_last_frame_url: explicit_previous.or_else(|| {
            around
                .and_then(|n| n.previous.as_ref())
                .and_then(|p| non_blank(&p.last_frame_url))
        }),
        next_first_frame_url: explicit_next.or_else(|| {
            around
                .and_then(|n| n.next.as_ref())
                .and_then(|n| non_blank(&n.first_frame_url))
        }),
    }
}

async fn load_world(state: &AppState, project_id: DbId, world_id: DbId) -> AppResult<World> {
    WorldRepo::find_by_id(&state.pool, project_id, world_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "world {world_id} does not belong to this project"
            )))
        })
}

/// The stored API key takes precedence over the configured one.
async fn stored_api_key(state: &AppState) -> AppResult<Option<String>> {
    Ok(SecretRepo::get_value(&state.pool, SECRET_LLM_API_KEY)
        .await?
        .filter(|k| !k.trim().is_empty()))
}

/// Run the compiler and record the result.
async fn compile_and_record(
    state: &AppState,
    project_id: DbId,
    shot_id: Option<DbId>,
    ctx: &CompileContext,
    api_key: Option<String>,
) -> AppResult<(CompileOutput, Compilation)> {
    let output = state.compiler.compile(ctx, api_key).await?;
    let input = serde_json::to_value(ctx)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize compile input: {e}")))?;

    let compilation = CompilationRepo::create(
        &state.pool,
        &CreateCompilation {
            project_id,
            shot_id,
            status: output.status().to_string(),
            input,
            output: output.to_value(),
        },
    )
    .await?;

    tracing::info!(
        compilation_id = %compilation.id,
        %project_id,
        shot_id = ?shot_id,
        status = output.status(),
        "Compilation recorded",
    );
    Ok((output, compilation))
}

// ---------------------------------------------------------------------------
// Compile
// ---------------------------------------------------------------------------

/// Request body for a single compile.
#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub scene_description: String,
    pub shot_id: Option<DbId>,
    pub world_id: Option<DbId>,
    #[serde(default)]
    pub character_ids: Vec<DbId>,
    pub emotional_zone: Option<String>,
    pub framing: Option<String>,
    pub camera_movement: Option<String>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub duration_target_sec: Option<f64>,
    #[serde(default)]
    pub reference_images: Vec<String>,
    pub previous_last_frame_url: Option<String>,
    pub next_first_frame_url: Option<String>,
    #[serde(default)]
    pub additional_context: String,
}

/// Response for a single compile.
#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub status: &'static str,
    pub result: serde_json::Value,
    pub compilation_id: DbId,
}

/// POST /api/projects/{project_id}/compile
pub async fn compile(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CompileRequest>,
) -> AppResult<Json<CompileResponse>> {
    let project = ensure_project(&state, project_id).await?;

    if input.scene_description.trim().is_empty() {
        return Err(CoreError::Validation("scene_description must not be empty".to_string()).into());
    }
    validate_opt(input.emotional_zone.as_deref(), validate_emotional_zone)?;
    validate_opt(input.framing.as_deref(), validate_framing)?;
    validate_opt(input.camera_movement.as_deref(), validate_camera_movement)?;

    let world = match input.world_id {
        Some(world_id) => Some(load_world(&state, project_id, world_id).await?),
        None => None,
    };
    let characters =
        CharacterRepo::list_by_ids(&state.pool, project_id, &input.character_ids).await?;
    if characters.len() != input.character_ids.len() {
        return Err(CoreError::Validation(
            "character_ids must reference characters of this project".to_string(),
        )
        .into());
    }

    let around = match input.shot_id {
        Some(shot_id) => {
            let shots: Vec<_> = ShotRepo::list_by_project(&state.pool, project_id)
                .await?
                .iter()
                .map(Shot::continuity)
                .collect();
            Some(neighbours(&shots, shot_id).ok_or(AppError::not_found("Shot", shot_id))?)
        }
        None => None,
    };

    let ctx = CompileContext {
        brand: brand_context(&project),
        world: world.as_ref().map(world_context),
        characters: characters.iter().map(character_context).collect(),
        shot: ShotParameters {
            emotional_zone: first_non_blank(
                &[input.emotional_zone.as_deref()],
                DEFAULT_EMOTIONAL_ZONE,
            ),
            framing: first_non_blank(&[input.framing.as_deref()], DEFAULT_FRAMING),
            camera_movement: first_non_blank(
                &[input.camera_movement.as_deref()],
                DEFAULT_CAMERA_MOVEMENT,
            ),
            time_of_day: first_non_blank(
                &[input.time_of_day.as_deref()],
                &project.default_time_of_day,
            ),
            weather: first_non_blank(&[input.weather.as_deref()], &project.default_weather),
            duration_target_sec: input.duration_target_sec,
        },
        continuity: continuity_context(
            input.previous_last_frame_url,
            input.next_first_frame_url,
            around.as_ref(),
        ),
        reference_images: input.reference_images,
        scene_description: input.scene_description,
        additional_context: input.additional_context,
    };

    let api_key = stored_api_key(&state).await?;
    let (output, compilation) =
        compile_and_record(&state, project_id, input.shot_id, &ctx, api_key).await?;

    Ok(Json(CompileResponse {
        status: output.status(),
        result: output.to_value(),
        compilation_id: compilation.id,
    }))
}

// ---------------------------------------------------------------------------
// Batch compile
// ---------------------------------------------------------------------------

/// Request body for a batch compile.
#[derive(Debug, Deserialize)]
pub struct BatchCompileRequest {
    pub shot_ids: Vec<DbId>,
}

/// Outcome for one shot of a batch.
#[derive(Debug, Serialize)]
pub struct BatchCompileItem {
    pub shot_id: DbId,
    pub shot_number: Option<i32>,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation_id: Option<DbId>,
}

impl BatchCompileItem {
    fn failed(shot_id: DbId, shot_number: Option<i32>, message: String) -> Self {
        Self {
            shot_id,
            shot_number,
            error: true,
            message: Some(message),
            status: None,
            result: None,
            compilation_id: None,
        }
    }
}

/// Response for a batch compile.
#[derive(Debug, Serialize)]
pub struct BatchCompileResponse {
    pub results: Vec<BatchCompileItem>,
    pub total: usize,
    pub success: usize,
}

/// Build the compile context for a stored shot from its own fields and its
/// scene.
async fn shot_context(
    state: &AppState,
    project: &Project,
    shot: &Shot,
    around: Option<&Neighbours>,
) -> AppResult<CompileContext> {
    let scene = SceneRepo::find_by_id(&state.pool, project.id, shot.scene_id)
        .await?
        .ok_or(AppError::not_found("Scene", shot.scene_id))?;
    let world = match scene.world_id {
        Some(world_id) => WorldRepo::find_by_id(&state.pool, project.id, world_id).await?,
        None => None,
    };
    let characters =
        CharacterRepo::list_by_ids(&state.pool, project.id, &scene.character_ids.0).await?;

    let mut extra = Vec::new();
    for (label, value) in [
        ("Intent", &shot.intent),
        ("Constraint", &shot.constraint),
        ("Emission", &shot.emission),
        ("Camera notes", &shot.camera_notes),
        ("Director notes", &scene.director_notes),
    ] {
        if !value.trim().is_empty() {
            extra.push(format!("{label}: {value}"));
        }
    }

    Ok(CompileContext {
        brand: brand_context(project),
        world: world.as_ref().map(world_context),
        characters: characters.iter().map(character_context).collect(),
        shot: ShotParameters {
            emotional_zone: first_non_blank(
                &[Some(scene.emotional_zone.as_str())],
                DEFAULT_EMOTIONAL_ZONE,
            ),
            framing: shot.framing.clone(),
            camera_movement: shot.camera_movement.clone(),
            time_of_day: first_non_blank(
                &[Some(scene.time_of_day.as_str())],
                &project.default_time_of_day,
            ),
            weather: first_non_blank(&[Some(scene.weather.as_str())], &project.default_weather),
            duration_target_sec: Some(shot.duration_target_sec),
        },
        continuity: continuity_context(None, None, around),
        reference_images: shot.reference_images.0.clone(),
        scene_description: first_non_blank(
            &[Some(shot.description.as_str()), Some(scene.synopsis.as_str())],
            &scene.title,
        ),
        additional_context: extra.join("\n"),
    })
}

/// POST /api/projects/{project_id}/batch-compile
///
/// Compiles each shot in turn. A failing shot is reported in its item and
/// does not stop the batch.
pub async fn batch_compile(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<BatchCompileRequest>,
) -> AppResult<Json<BatchCompileResponse>> {
    let project = ensure_project(&state, project_id).await?;
    if input.shot_ids.is_empty() {
        return Err(AppError::BadRequest("shot_ids must not be empty".to_string()));
    }

    let shots = ShotRepo::list_by_project(&state.pool, project_id).await?;
    let timeline: Vec<_> = shots.iter().map(Shot::continuity).collect();
    let api_key = stored_api_key(&state).await?;

    let mut results = Vec::with_capacity(input.shot_ids.len());
    for shot_id in &input.shot_ids {
        let Some(shot) = shots.iter().find(|s| s.id == *shot_id) else {
            results.push(BatchCompileItem::failed(
                *shot_id,
                None,
                format!("Shot with id {shot_id} not found"),
            ));
            continue;
        };

        let around = neighbours(&timeline, shot.id);
        let outcome = match shot_context(&state, &project, shot, around.as_ref()).await {
            Ok(ctx) => {
                compile_and_record(&state, project_id, Some(shot.id), &ctx, api_key.clone()).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok((output, compilation)) => results.push(BatchCompileItem {
                shot_id: shot.id,
                shot_number: Some(shot.shot_number),
                error: false,
                message: None,
                status: Some(output.status()),
                result: Some(output.to_value()),
                compilation_id: Some(compilation.id),
            }),
            Err(e) => {
                tracing::warn!(shot_id = %shot.id, error = %e, "Batch compile item failed");
                results.push(BatchCompileItem::failed(
                    shot.id,
                    Some(shot.shot_number),
                    e.to_string(),
                ));
            }
        }
    }

    let success = results.iter().filter(|r| !r.error).count();
    tracing::info!(%project_id, total = results.len(), success, "Batch compile finished");
    Ok(Json(BatchCompileResponse {
        total: results.len(),
        success,
        results,
    }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/projects/{project_id}/compilations[?shot_id=]
///
/// Newest first.
pub async fn list_compilations(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ShotFilterParams>,
) -> AppResult<Json<Vec<Compilation>>> {
    ensure_project(&state, project_id).await?;
    let compilations =
        CompilationRepo::list_by_project(&state.pool, project_id, params.shot_id).await?;
    Ok(Json(compilations))
}

// ---------------------------------------------------------------------------
// Describe image
// ---------------------------------------------------------------------------

/// Request body for an image describe.
#[derive(Debug, Deserialize)]
pub struct DescribeImageRequest {
    #[serde(default)]
    pub image_url: String,
    pub entity_type: EntityKind,
    #[serde(default)]
    pub additional_context: String,
}

/// Response for an image describe.
#[derive(Debug, Serialize)]
pub struct DescribeImageResponse {
    pub status: &'static str,
    pub result: serde_json::Value,
}

/// POST /api/projects/{project_id}/describe-image
pub async fn describe_image(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<DescribeImageRequest>,
) -> AppResult<Json<DescribeImageResponse>> {
    ensure_project(&state, project_id).await?;
    if input.image_url.trim().is_empty() {
        return Err(CoreError::Validation("image_url must not be empty".to_string()).into());
    }

    let api_key = stored_api_key(&state).await?;
    let described = state
        .compiler
        .describe_image(
            &input.image_url,
            input.entity_type,
            EMOTIONAL_ZONES,
            &input.additional_context,
            api_key,
        )
        .await?;

    tracing::info!(
        %project_id,
        entity_type = input.entity_type.as_str(),
        status = described.status,
        "Image described",
    );
    Ok(Json(DescribeImageResponse {
        status: described.status,
        result: described.result,
    }))
}
