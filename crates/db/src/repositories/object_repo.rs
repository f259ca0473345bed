//! Repository for the `objects` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::object::{CreateStoryObject, StoryObject, UpdateStoryObject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, category, description, narrative_significance, \
    usage_notes, reference_images, tags, created_at, updated_at";

/// Provides CRUD operations for objects (props).
pub struct ObjectRepo;

impl ObjectRepo {
    /// Insert a new object, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        project_id: DbId,
        input: &CreateStoryObject,
    ) -> Result<StoryObject, sqlx::Error> {
        let query = format!(
            "INSERT INTO objects
                (id, project_id, name, category, description, narrative_significance,
                 usage_notes, reference_images, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, COALESCE(?4, ''), COALESCE(?5, ''), COALESCE(?6, ''),
                     COALESCE(?7, ''), COALESCE(?8, '[]'), COALESCE(?9, '[]'), ?10, ?10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryObject>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.narrative_significance)
            .bind(&input.usage_notes)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find an object by ID within a project.
    pub async fn find_by_id(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<StoryObject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objects WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, StoryObject>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's objects in creation order.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<StoryObject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objects WHERE project_id = ?1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, StoryObject>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an object. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        input: &UpdateStoryObject,
    ) -> Result<Option<StoryObject>, sqlx::Error> {
        let query = format!(
            "UPDATE objects SET
                name = COALESCE(?3, name),
                category = COALESCE(?4, category),
                description = COALESCE(?5, description),
                narrative_significance = COALESCE(?6, narrative_significance),
                usage_notes = COALESCE(?7, usage_notes),
                reference_images = COALESCE(?8, reference_images),
                tags = COALESCE(?9, tags),
                updated_at = ?10
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryObject>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.narrative_significance)
            .bind(&input.usage_notes)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete an object. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM objects WHERE id = ?1 AND project_id = ?2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
