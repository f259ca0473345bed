//! Dashboard aggregate models.

use indexmap::IndexMap;
use serde::Serialize;
use sqlx::FromRow;

/// Entity totals across all projects.
#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct EntityTotals {
    pub project_count: i64,
    pub total_shots: i64,
    pub total_worlds: i64,
    pub total_characters: i64,
}

/// Global dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    #[serde(flatten)]
    pub totals: EntityTotals,
    pub stage_counts: IndexMap<String, i64>,
    pub total_duration_sec: f64,
}
