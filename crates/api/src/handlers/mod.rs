pub mod character;
pub mod compiler;
pub mod continuity;
pub mod dashboard;
pub mod enums;
pub mod object;
pub mod project;
pub mod scene;
pub mod secrets;
pub mod seed;
pub mod shot;
pub mod world;

use storyforge_core::types::DbId;
use storyforge_db::models::project::Project;
use storyforge_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load the project named in the path or fail with 404.
///
/// Every nested resource checks its parent first so a missing project is
/// reported as such rather than as a missing child.
pub(crate) async fn ensure_project(state: &AppState, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))
}
