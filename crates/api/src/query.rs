//! Shared query parameter types for API handlers.

use serde::Deserialize;
use storyforge_core::types::DbId;

/// `?scene_id=` filter for shot listing.
#[derive(Debug, Deserialize)]
pub struct SceneFilterParams {
    pub scene_id: Option<DbId>,
}

/// `?shot_id=` filter for compilation history.
#[derive(Debug, Deserialize)]
pub struct ShotFilterParams {
    pub shot_id: Option<DbId>,
}

/// `?status=` for direct status updates.
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}
