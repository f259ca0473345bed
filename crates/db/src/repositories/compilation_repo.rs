//! Repository for the `compilations` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::compilation::{Compilation, CreateCompilation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, shot_id, status, input, output, created_at";

/// Provides persistence for compilation history.
pub struct CompilationRepo;

impl CompilationRepo {
    /// Record a compilation, returning the stored row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateCompilation,
    ) -> Result<Compilation, sqlx::Error> {
        let query = format!(
            "INSERT INTO compilations (id, project_id, shot_id, status, input, output, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Compilation>(&query)
            .bind(new_id())
            .bind(input.project_id)
            .bind(input.shot_id)
            .bind(&input.status)
            .bind(Json(&input.input))
            .bind(Json(&input.output))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List a project's compilations newest first, optionally for one shot.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
        shot_id: Option<DbId>,
    ) -> Result<Vec<Compilation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM compilations
             WHERE project_id = ?1 AND (?2 IS NULL OR shot_id = ?2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Compilation>(&query)
            .bind(project_id)
            .bind(shot_id)
            .fetch_all(pool)
            .await
    }
}
