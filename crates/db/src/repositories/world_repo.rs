//! Repository for the `worlds` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::world::{CreateWorld, UpdateWorld, World};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, emotional_zone, atmosphere, \
    time_of_day, weather, spatial_character, lighting_notes, marble_url, reference_images, \
    tags, created_at, updated_at";

/// Provides CRUD operations for worlds.
pub struct WorldRepo;

impl WorldRepo {
    /// Insert a new world, returning the created row.
    ///
    /// If `emotional_zone` is `None`, defaults to `'contemplative'`.
    pub async fn create(
        pool: &SqlitePool,
        project_id: DbId,
        input: &CreateWorld,
    ) -> Result<World, sqlx::Error> {
        let query = format!(
            "INSERT INTO worlds
                (id, project_id, name, description, emotional_zone, atmosphere, time_of_day,
                 weather, spatial_character, lighting_notes, marble_url, reference_images, tags,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, COALESCE(?4, ''), COALESCE(?5, 'contemplative'),
                     COALESCE(?6, ''), COALESCE(?7, ''), COALESCE(?8, ''), COALESCE(?9, ''),
                     COALESCE(?10, ''), COALESCE(?11, ''), COALESCE(?12, '[]'),
                     COALESCE(?13, '[]'), ?14, ?14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.emotional_zone)
            .bind(&input.atmosphere)
            .bind(&input.time_of_day)
            .bind(&input.weather)
            .bind(&input.spatial_character)
            .bind(&input.lighting_notes)
            .bind(&input.marble_url)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a world by ID within a project.
    pub async fn find_by_id(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<World>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worlds WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, World>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's worlds in creation order.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<World>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM worlds WHERE project_id = ?1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a world. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such world exists in the project.
    pub async fn update(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        input: &UpdateWorld,
    ) -> Result<Option<World>, sqlx::Error> {
        let query = format!(
            "UPDATE worlds SET
                name = COALESCE(?3, name),
                description = COALESCE(?4, description),
                emotional_zone = COALESCE(?5, emotional_zone),
                atmosphere = COALESCE(?6, atmosphere),
                time_of_day = COALESCE(?7, time_of_day),
                weather = COALESCE(?8, weather),
                spatial_character = COALESCE(?9, spatial_character),
                lighting_notes = COALESCE(?10, lighting_notes),
                marble_url = COALESCE(?11, marble_url),
                reference_images = COALESCE(?12, reference_images),
                tags = COALESCE(?13, tags),
                updated_at = ?14
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.emotional_zone)
            .bind(&input.atmosphere)
            .bind(&input.time_of_day)
            .bind(&input.weather)
            .bind(&input.spatial_character)
            .bind(&input.lighting_notes)
            .bind(&input.marble_url)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a world. Scenes referencing it keep existing with `world_id`
    /// cleared. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM worlds WHERE id = ?1 AND project_id = ?2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
