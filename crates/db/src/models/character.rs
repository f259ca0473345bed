//! Character entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// A free-form relationship entry, e.g. `{"character": "...", "kind": "mentor"}`.
pub type Relationship = BTreeMap<String, String>;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub role: String,
    pub description: String,
    pub personality: String,
    pub visual_notes: String,
    pub voice_profile: String,
    pub motivation_notes: String,
    pub arc_summary: String,
    pub identity_images: Json<Vec<String>>,
    pub relationships: Json<Vec<Relationship>>,
    pub tags: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub visual_notes: Option<String>,
    pub voice_profile: Option<String>,
    pub motivation_notes: Option<String>,
    pub arc_summary: Option<String>,
    pub identity_images: Option<Vec<String>>,
    pub relationships: Option<Vec<Relationship>>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub visual_notes: Option<String>,
    pub voice_profile: Option<String>,
    pub motivation_notes: Option<String>,
    pub arc_summary: Option<String>,
    pub identity_images: Option<Vec<String>>,
    pub relationships: Option<Vec<Relationship>>,
    pub tags: Option<Vec<String>>,
}
