//! Repository for the `scenes` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::scene::{CreateScene, Scene, SceneWithShotCount, UpdateScene};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, scene_number, title, synopsis, world_id, character_ids, \
    emotional_zone, narrative_purpose, dramatic_tension, time_of_day, weather, lighting, \
    director_notes, created_at, updated_at";

/// Provides CRUD operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene, returning the created row.
    ///
    /// If `emotional_zone` is `None`, defaults to `'contemplative'`.
    /// If `dramatic_tension` is `None`, defaults to 5.
    pub async fn create(
        pool: &SqlitePool,
        project_id: DbId,
        input: &CreateScene,
    ) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes
                (id, project_id, scene_number, title, synopsis, world_id, character_ids,
                 emotional_zone, narrative_purpose, dramatic_tension, time_of_day, weather,
                 lighting, director_notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, ''), ?6, COALESCE(?7, '[]'),
                     COALESCE(?8, 'contemplative'), COALESCE(?9, ''), COALESCE(?10, 5),
                     COALESCE(?11, ''), COALESCE(?12, ''), COALESCE(?13, ''), COALESCE(?14, ''),
                     ?15, ?15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(input.scene_number)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(input.world_id)
            .bind(input.character_ids.as_ref().map(Json))
            .bind(&input.emotional_zone)
            .bind(&input.narrative_purpose)
            .bind(input.dramatic_tension)
            .bind(&input.time_of_day)
            .bind(&input.weather)
            .bind(&input.lighting)
            .bind(&input.director_notes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a scene by ID within a project.
    pub async fn find_by_id(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's scenes ordered by `scene_number`.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes WHERE project_id = ?1 ORDER BY scene_number ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Like [`Self::list_by_project`], with each scene's shot count.
    pub async fn list_with_shot_counts(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<SceneWithShotCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COUNT(*) FROM shots WHERE shots.scene_id = scenes.id) AS shot_count
             FROM scenes
             WHERE project_id = ?1
             ORDER BY scene_number ASC"
        );
        sqlx::query_as::<_, SceneWithShotCount>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a scene. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such scene exists in the project.
    pub async fn update(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET
                scene_number = COALESCE(?3, scene_number),
                title = COALESCE(?4, title),
                synopsis = COALESCE(?5, synopsis),
                world_id = COALESCE(?6, world_id),
                character_ids = COALESCE(?7, character_ids),
                emotional_zone = COALESCE(?8, emotional_zone),
                narrative_purpose = COALESCE(?9, narrative_purpose),
                dramatic_tension = COALESCE(?10, dramatic_tension),
                time_of_day = COALESCE(?11, time_of_day),
                weather = COALESCE(?12, weather),
                lighting = COALESCE(?13, lighting),
                director_notes = COALESCE(?14, director_notes),
                updated_at = ?15
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.scene_number)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(input.world_id)
            .bind(input.character_ids.as_ref().map(Json))
            .bind(&input.emotional_zone)
            .bind(&input.narrative_purpose)
            .bind(input.dramatic_tension)
            .bind(&input.time_of_day)
            .bind(&input.weather)
            .bind(&input.lighting)
            .bind(&input.director_notes)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a scene and, via cascade, its shots. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &SqlitePool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = ?1 AND project_id = ?2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
