//! World (location) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `worlds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct World {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub emotional_zone: String,
    pub atmosphere: String,
    pub time_of_day: String,
    pub weather: String,
    pub spatial_character: String,
    pub lighting_notes: String,
    /// Link to the world's Marble (3D world model) page.
    pub marble_url: String,
    pub reference_images: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new world.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWorld {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `contemplative` if omitted.
    pub emotional_zone: Option<String>,
    pub atmosphere: Option<String>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub spatial_character: Option<String>,
    pub lighting_notes: Option<String>,
    pub marble_url: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing world. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorld {
    pub name: Option<String>,
    pub description: Option<String>,
    pub emotional_zone: Option<String>,
    pub atmosphere: Option<String>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub spatial_character: Option<String>,
    pub lighting_notes: Option<String>,
    pub marble_url: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}
