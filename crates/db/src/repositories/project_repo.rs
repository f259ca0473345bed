//! Repository for the `projects` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::project::{CreateProject, Project, ProjectCounts, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, brand_primary, brand_secondary, description, visual_style, \
    default_time_of_day, default_weather, default_lighting, default_aspect_ratio, \
    target_duration_sec, compliance_notes, forbidden_elements, required_elements, \
    model_preferences, tags, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Omitted shoot defaults fall back to `day` / `clear` / `natural` / `16:9`.
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO projects
                (id, name, brand_primary, brand_secondary, description, visual_style,
                 default_time_of_day, default_weather, default_lighting, default_aspect_ratio,
                 target_duration_sec, compliance_notes, forbidden_elements, required_elements,
                 model_preferences, tags, created_at, updated_at)
             VALUES (?1, ?2, COALESCE(?3, ''), COALESCE(?4, ''), COALESCE(?5, ''), COALESCE(?6, ''),
                     COALESCE(?7, 'day'), COALESCE(?8, 'clear'), COALESCE(?9, 'natural'),
                     COALESCE(?10, '16:9'), ?11, COALESCE(?12, '[]'), COALESCE(?13, '[]'),
                     COALESCE(?14, '[]'), COALESCE(?15, '{{}}'), COALESCE(?16, '[]'), ?17, ?17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.brand_primary)
            .bind(&input.brand_secondary)
            .bind(&input.description)
            .bind(&input.visual_style)
            .bind(&input.default_time_of_day)
            .bind(&input.default_weather)
            .bind(&input.default_lighting)
            .bind(&input.default_aspect_ratio)
            .bind(input.target_duration_sec)
            .bind(input.compliance_notes.as_ref().map(Json))
            .bind(input.forbidden_elements.as_ref().map(Json))
            .bind(input.required_elements.as_ref().map(Json))
            .bind(input.model_preferences.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the first project with exactly this name.
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE name = ?1 ORDER BY created_at ASC LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently updated first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY updated_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE(?2, name),
                brand_primary = COALESCE(?3, brand_primary),
                brand_secondary = COALESCE(?4, brand_secondary),
                description = COALESCE(?5, description),
                visual_style = COALESCE(?6, visual_style),
                default_time_of_day = COALESCE(?7, default_time_of_day),
                default_weather = COALESCE(?8, default_weather),
                default_lighting = COALESCE(?9, default_lighting),
                default_aspect_ratio = COALESCE(?10, default_aspect_ratio),
                target_duration_sec = COALESCE(?11, target_duration_sec),
                compliance_notes = COALESCE(?12, compliance_notes),
                forbidden_elements = COALESCE(?13, forbidden_elements),
                required_elements = COALESCE(?14, required_elements),
                model_preferences = COALESCE(?15, model_preferences),
                tags = COALESCE(?16, tags),
                updated_at = ?17
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.brand_primary)
            .bind(&input.brand_secondary)
            .bind(&input.description)
            .bind(&input.visual_style)
            .bind(&input.default_time_of_day)
            .bind(&input.default_weather)
            .bind(&input.default_lighting)
            .bind(&input.default_aspect_ratio)
            .bind(input.target_duration_sec)
            .bind(input.compliance_notes.as_ref().map(Json))
            .bind(input.forbidden_elements.as_ref().map(Json))
            .bind(input.required_elements.as_ref().map(Json))
            .bind(input.model_preferences.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Bump `updated_at` after a child entity changed.
    pub async fn touch(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE projects SET updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a project and, via cascading foreign keys, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the worlds, characters, objects and scenes a project owns.
    pub async fn counts(pool: &SqlitePool, id: DbId) -> Result<ProjectCounts, sqlx::Error> {
        sqlx::query_as::<_, ProjectCounts>(
            "SELECT
                (SELECT COUNT(*) FROM worlds WHERE project_id = ?1) AS world_count,
                (SELECT COUNT(*) FROM characters WHERE project_id = ?1) AS character_count,
                (SELECT COUNT(*) FROM objects WHERE project_id = ?1) AS object_count,
                (SELECT COUNT(*) FROM scenes WHERE project_id = ?1) AS scene_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
