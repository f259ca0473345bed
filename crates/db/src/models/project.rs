//! Project entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::stats::ProductionStats;
use storyforge_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub brand_primary: String,
    pub brand_secondary: String,
    pub description: String,
    pub visual_style: String,
    // -- Default shoot parameters --
    pub default_time_of_day: String,
    pub default_weather: String,
    pub default_lighting: String,
    pub default_aspect_ratio: String,
    pub target_duration_sec: Option<f64>,
    // -- Compliance rails --
    pub compliance_notes: Json<Vec<String>>,
    pub forbidden_elements: Json<Vec<String>>,
    pub required_elements: Json<Vec<String>>,
    /// Generation model per output type, e.g. `{"image": "..."}`.
    pub model_preferences: Json<BTreeMap<String, String>>,
    pub tags: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub brand_primary: Option<String>,
    pub brand_secondary: Option<String>,
    pub description: Option<String>,
    pub visual_style: Option<String>,
    /// Defaults to `day` if omitted.
    pub default_time_of_day: Option<String>,
    /// Defaults to `clear` if omitted.
    pub default_weather: Option<String>,
    /// Defaults to `natural` if omitted.
    pub default_lighting: Option<String>,
    /// Defaults to `16:9` if omitted.
    pub default_aspect_ratio: Option<String>,
    pub target_duration_sec: Option<f64>,
    pub compliance_notes: Option<Vec<String>>,
    pub forbidden_elements: Option<Vec<String>>,
    pub required_elements: Option<Vec<String>>,
    pub model_preferences: Option<BTreeMap<String, String>>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub brand_primary: Option<String>,
    pub brand_secondary: Option<String>,
    pub description: Option<String>,
    pub visual_style: Option<String>,
    pub default_time_of_day: Option<String>,
    pub default_weather: Option<String>,
    pub default_lighting: Option<String>,
    pub default_aspect_ratio: Option<String>,
    pub target_duration_sec: Option<f64>,
    pub compliance_notes: Option<Vec<String>>,
    pub forbidden_elements: Option<Vec<String>>,
    pub required_elements: Option<Vec<String>>,
    pub model_preferences: Option<BTreeMap<String, String>>,
    pub tags: Option<Vec<String>>,
}

/// Child-entity counts for one project.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ProjectCounts {
    pub world_count: i64,
    pub character_count: i64,
    pub object_count: i64,
    pub scene_count: i64,
}

/// A project with its derived, read-only statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithStats {
    #[serde(flatten)]
    pub project: Project,
    #[serde(flatten)]
    pub counts: ProjectCounts,
    #[serde(flatten)]
    pub stats: ProductionStats,
}
