//! Object (prop) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `objects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryObject {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub narrative_significance: String,
    pub usage_notes: String,
    pub reference_images: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoryObject {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub narrative_significance: Option<String>,
    pub usage_notes: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing object. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStoryObject {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub narrative_significance: Option<String>,
    pub usage_notes: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}
