//! Repository for the `characters` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::types::{new_id, DbId};

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, role, description, personality, visual_notes, \
    voice_profile, motivation_notes, arc_summary, identity_images, relationships, tags, \
    created_at, updated_at";

/// Provides CRUD operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        project_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                (id, project_id, name, role, description, personality, visual_notes,
                 voice_profile, motivation_notes, arc_summary, identity_images, relationships,
                 tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, COALESCE(?4, ''), COALESCE(?5, ''), COALESCE(?6, ''),
                     COALESCE(?7, ''), COALESCE(?8, ''), COALESCE(?9, ''), COALESCE(?10, ''),
                     COALESCE(?11, '[]'), COALESCE(?12, '[]'), COALESCE(?13, '[]'), ?14, ?14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.description)
            .bind(&input.personality)
            .bind(&input.visual_notes)
            .bind(&input.voice_profile)
            .bind(&input.motivation_notes)
            .bind(&input.arc_summary)
            .bind(input.identity_images.as_ref().map(Json))
            .bind(input.relationships.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a character by ID within a project.
    pub async fn find_by_id(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's characters in creation order.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE project_id = ?1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve a scene's `character_ids`, preserving the requested order.
    ///
    /// Ids that do not belong to the project are skipped.
    pub async fn list_by_ids(
        pool: &SqlitePool,
        project_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Character>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let all = Self::list_by_project(pool, project_id).await?;
        Ok(ids
            .iter()
            .filter_map(|id| all.iter().find(|c| c.id == *id).cloned())
            .collect())
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such character exists in the project.
    pub async fn update(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE(?3, name),
                role = COALESCE(?4, role),
                description = COALESCE(?5, description),
                personality = COALESCE(?6, personality),
                visual_notes = COALESCE(?7, visual_notes),
                voice_profile = COALESCE(?8, voice_profile),
                motivation_notes = COALESCE(?9, motivation_notes),
                arc_summary = COALESCE(?10, arc_summary),
                identity_images = COALESCE(?11, identity_images),
                relationships = COALESCE(?12, relationships),
                tags = COALESCE(?13, tags),
                updated_at = ?14
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.description)
            .bind(&input.personality)
            .bind(&input.visual_notes)
            .bind(&input.voice_profile)
            .bind(&input.motivation_notes)
            .bind(&input.arc_summary)
            .bind(input.identity_images.as_ref().map(Json))
            .bind(input.relationships.as_ref().map(Json))
            .bind(input.tags.as_ref().map(Json))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a character. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?1 AND project_id = ?2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
