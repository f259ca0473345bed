//! Shot entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::ordering::{ContinuityShot, ShotSlot};
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `shots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shot {
    pub id: DbId,
    pub project_id: DbId,
    pub scene_id: DbId,
    /// Project-wide timeline position; unique per project.
    pub shot_number: i32,
    pub description: String,
    pub duration_target_sec: f64,
    pub framing: String,
    pub camera_movement: String,
    pub camera_notes: String,
    pub production_status: String,
    // -- Prompt stack --
    pub intent: String,
    #[sqlx(rename = "shot_constraint")]
    pub constraint: String,
    pub emission: String,
    // -- Audio stack --
    pub sound_design: String,
    pub volume_layers: String,
    pub spatial: String,
    pub narrative: String,
    #[sqlx(rename = "audio_exclude")]
    pub exclude: String,
    // -- Continuity --
    pub transition_in: String,
    pub transition_out: String,
    pub first_frame_url: String,
    pub last_frame_url: String,
    // -- Assets --
    pub reference_images: Json<Vec<String>>,
    pub reference_frame_url: String,
    pub generated_asset_url: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shot {
    pub fn slot(&self) -> ShotSlot {
        ShotSlot {
            id: self.id,
            scene_id: self.scene_id,
            shot_number: self.shot_number,
        }
    }

    pub fn continuity(&self) -> ContinuityShot {
        ContinuityShot {
            id: self.id,
            scene_id: self.scene_id,
            shot_number: self.shot_number,
            first_frame_url: self.first_frame_url.clone(),
            last_frame_url: self.last_frame_url.clone(),
        }
    }
}

/// DTO for creating a new shot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShot {
    pub scene_id: DbId,
    /// Next free number in the project if omitted.
    pub shot_number: Option<i32>,
    pub description: Option<String>,
    /// Defaults to 5.0 if omitted.
    pub duration_target_sec: Option<f64>,
    /// Defaults to `medium` if omitted.
    pub framing: Option<String>,
    /// Defaults to `static` if omitted.
    pub camera_movement: Option<String>,
    pub camera_notes: Option<String>,
    /// Defaults to `concept` if omitted.
    pub production_status: Option<String>,
    pub intent: Option<String>,
    pub constraint: Option<String>,
    pub emission: Option<String>,
    pub sound_design: Option<String>,
    pub volume_layers: Option<String>,
    pub spatial: Option<String>,
    pub narrative: Option<String>,
    pub exclude: Option<String>,
    /// Defaults to `cut` if omitted.
    pub transition_in: Option<String>,
    /// Defaults to `cut` if omitted.
    pub transition_out: Option<String>,
    pub first_frame_url: Option<String>,
    pub last_frame_url: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub reference_frame_url: Option<String>,
    pub generated_asset_url: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing shot. All fields are optional; unknown
/// keys (e.g. a whole shot record echoed back) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShot {
    pub scene_id: Option<DbId>,
    pub shot_number: Option<i32>,
    pub description: Option<String>,
    pub duration_target_sec: Option<f64>,
    pub framing: Option<String>,
    pub camera_movement: Option<String>,
    pub camera_notes: Option<String>,
    pub production_status: Option<String>,
    pub intent: Option<String>,
    pub constraint: Option<String>,
    pub emission: Option<String>,
    pub sound_design: Option<String>,
    pub volume_layers: Option<String>,
    pub spatial: Option<String>,
    pub narrative: Option<String>,
    pub exclude: Option<String>,
    pub transition_in: Option<String>,
    pub transition_out: Option<String>,
    pub first_frame_url: Option<String>,
    pub last_frame_url: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub reference_frame_url: Option<String>,
    pub generated_asset_url: Option<String>,
    pub notes: Option<String>,
}

impl UpdateShot {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.scene_id.is_none()
            && self.shot_number.is_none()
            && self.description.is_none()
            && self.duration_target_sec.is_none()
            && self.framing.is_none()
            && self.camera_movement.is_none()
            && self.camera_notes.is_none()
            && self.production_status.is_none()
            && self.intent.is_none()
            && self.constraint.is_none()
            && self.emission.is_none()
            && self.sound_design.is_none()
            && self.volume_layers.is_none()
            && self.spatial.is_none()
            && self.narrative.is_none()
            && self.exclude.is_none()
            && self.transition_in.is_none()
            && self.transition_out.is_none()
            && self.first_frame_url.is_none()
            && self.last_frame_url.is_none()
            && self.reference_images.is_none()
            && self.reference_frame_url.is_none()
            && self.generated_asset_url.is_none()
            && self.notes.is_none()
    }
}
