//! Cross-project aggregates for the dashboard.

use sqlx::SqlitePool;
use storyforge_core::stats::summarize;

use crate::models::dashboard::{DashboardStats, EntityTotals};
use crate::repositories::ShotRepo;

/// Read-only aggregate queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Entity totals across all projects.
    pub async fn totals(pool: &SqlitePool) -> Result<EntityTotals, sqlx::Error> {
        sqlx::query_as::<_, EntityTotals>(
            "SELECT
                (SELECT COUNT(*) FROM projects) AS project_count,
                (SELECT COUNT(*) FROM shots) AS total_shots,
                (SELECT COUNT(*) FROM worlds) AS total_worlds,
                (SELECT COUNT(*) FROM characters) AS total_characters",
        )
        .fetch_one(pool)
        .await
    }

    /// Totals plus the stage distribution and summed duration of all shots.
    pub async fn stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
        let totals = Self::totals(pool).await?;
        let progress = ShotRepo::progress_all(pool).await?;
        let summary = summarize(&progress);
        Ok(DashboardStats {
            totals,
            stage_counts: summary.stage_counts,
            total_duration_sec: summary.total_duration,
        })
    }
}
