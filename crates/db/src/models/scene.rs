//! Scene entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `scenes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub project_id: DbId,
    /// Ordering key within the project.
    pub scene_number: i32,
    pub title: String,
    pub synopsis: String,
    /// Cleared automatically when the referenced world is deleted.
    pub world_id: Option<DbId>,
    pub character_ids: Json<Vec<DbId>>,
    pub emotional_zone: String,
    pub narrative_purpose: String,
    /// 1-10.
    pub dramatic_tension: i32,
    pub time_of_day: String,
    pub weather: String,
    pub lighting: String,
    pub director_notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A scene as listed, with the number of shots it owns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SceneWithShotCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub scene: Scene,
    pub shot_count: i64,
}

/// DTO for creating a new scene.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateScene {
    pub scene_number: i32,
    pub title: String,
    pub synopsis: Option<String>,
    pub world_id: Option<DbId>,
    pub character_ids: Option<Vec<DbId>>,
    /// Defaults to `contemplative` if omitted.
    pub emotional_zone: Option<String>,
    pub narrative_purpose: Option<String>,
    /// Defaults to 5 if omitted.
    pub dramatic_tension: Option<i32>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub lighting: Option<String>,
    pub director_notes: Option<String>,
}

/// DTO for updating an existing scene. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScene {
    pub scene_number: Option<i32>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub world_id: Option<DbId>,
    pub character_ids: Option<Vec<DbId>>,
    pub emotional_zone: Option<String>,
    pub narrative_purpose: Option<String>,
    pub dramatic_tension: Option<i32>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub lighting: Option<String>,
    pub director_notes: Option<String>,
}
