//! Controlled vocabularies for client dropdowns.

use axum::Json;
use serde::Serialize;
use storyforge_core::pipeline::PRODUCTION_STAGES;
use storyforge_core::vocabulary::{CAMERA_MOVEMENTS, EMOTIONAL_ZONES, FRAMINGS, TRANSITIONS};

#[derive(Debug, Serialize)]
pub struct EnumsResponse {
    pub production_stages: &'static [&'static str],
    pub emotional_zones: &'static [&'static str],
    pub framings: &'static [&'static str],
    pub camera_movements: &'static [&'static str],
    pub transitions: &'static [&'static str],
}

/// GET /api/enums
pub async fn list() -> Json<EnumsResponse> {
    Json(EnumsResponse {
        production_stages: PRODUCTION_STAGES,
        emotional_zones: EMOTIONAL_ZONES,
        framings: FRAMINGS,
        camera_movements: CAMERA_MOVEMENTS,
        transitions: TRANSITIONS,
    })
}
