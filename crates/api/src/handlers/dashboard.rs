use axum::extract::State;
use axum::Json;
use storyforge_db::models::dashboard::DashboardStats;
use storyforge_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/dashboard/stats
///
/// Totals across every project plus a global stage breakdown.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}
