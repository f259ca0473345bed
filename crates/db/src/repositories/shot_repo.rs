//! Repository for the `shots` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use storyforge_core::ordering::{next_shot_number, ReorderPlan};
use storyforge_core::pipeline::ProductionStage;
use storyforge_core::stats::ShotProgress;
use storyforge_core::types::{new_id, DbId};

use crate::models::shot::{CreateShot, Shot, UpdateShot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, scene_id, shot_number, description, duration_target_sec, \
    framing, camera_movement, camera_notes, production_status, intent, shot_constraint, emission, \
    sound_design, volume_layers, spatial, narrative, audio_exclude, transition_in, transition_out, \
    first_frame_url, last_frame_url, reference_images, reference_frame_url, generated_asset_url, \
    notes, created_at, updated_at";

/// Provides CRUD, status and ordering operations for shots.
pub struct ShotRepo;

impl ShotRepo {
    /// Insert a new shot, returning the created row.
    ///
    /// When `shot_number` is omitted the next free number in the project is
    /// used. Omitted enum fields take their defaults (`medium`, `static`,
    /// `concept`, `cut`).
    pub async fn create(
        pool: &SqlitePool,
        project_id: DbId,
        input: &CreateShot,
    ) -> Result<Shot, sqlx::Error> {
        let shot_number = match input.shot_number {
            Some(n) => n,
            None => Self::next_number(pool, project_id).await?,
        };
        let query = format!(
            "INSERT INTO shots
                (id, project_id, scene_id, shot_number, description, duration_target_sec,
                 framing, camera_movement, camera_notes, production_status, intent,
                 shot_constraint, emission, sound_design, volume_layers, spatial, narrative,
                 audio_exclude, transition_in, transition_out, first_frame_url, last_frame_url,
                 reference_images, reference_frame_url, generated_asset_url, notes,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, COALESCE(?5, ''), COALESCE(?6, 5.0),
                     COALESCE(?7, 'medium'), COALESCE(?8, 'static'), COALESCE(?9, ''),
                     COALESCE(?10, 'concept'), COALESCE(?11, ''), COALESCE(?12, ''),
                     COALESCE(?13, ''), COALESCE(?14, ''), COALESCE(?15, ''), COALESCE(?16, ''),
                     COALESCE(?17, ''), COALESCE(?18, ''), COALESCE(?19, 'cut'),
                     COALESCE(?20, 'cut'), COALESCE(?21, ''), COALESCE(?22, ''),
                     COALESCE(?23, '[]'), COALESCE(?24, ''), COALESCE(?25, ''), COALESCE(?26, ''),
                     ?27, ?27)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(new_id())
            .bind(project_id)
            .bind(input.scene_id)
            .bind(shot_number)
            .bind(&input.description)
            .bind(input.duration_target_sec)
            .bind(&input.framing)
            .bind(&input.camera_movement)
            .bind(&input.camera_notes)
            .bind(&input.production_status)
            .bind(&input.intent)
            .bind(&input.constraint)
            .bind(&input.emission)
            .bind(&input.sound_design)
            .bind(&input.volume_layers)
            .bind(&input.spatial)
            .bind(&input.narrative)
            .bind(&input.exclude)
            .bind(&input.transition_in)
            .bind(&input.transition_out)
            .bind(&input.first_frame_url)
            .bind(&input.last_frame_url)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(&input.reference_frame_url)
            .bind(&input.generated_asset_url)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Every `shot_number` in use in a project.
    pub async fn shot_numbers(pool: &SqlitePool, project_id: DbId) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT shot_number FROM shots WHERE project_id = ?1")
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The next free `shot_number` in a project.
    ///
    /// An exhausted number range surfaces as [`sqlx::Error::Protocol`]; the
    /// API resolves numbers itself through [`next_shot_number`] to report it
    /// as a conflict.
    pub async fn next_number(pool: &SqlitePool, project_id: DbId) -> Result<i32, sqlx::Error> {
        let numbers = Self::shot_numbers(pool, project_id).await?;
        next_shot_number(numbers).map_err(|e| sqlx::Error::Protocol(e.to_string()))
    }

    /// Find a shot by ID within a project.
    pub async fn find_by_id(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shots WHERE id = ?1 AND project_id = ?2");
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's shots ordered by `shot_number`.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shots WHERE project_id = ?1 ORDER BY shot_number ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List one scene's shots ordered by `shot_number`.
    pub async fn list_by_scene(
        pool: &SqlitePool,
        project_id: DbId,
        scene_id: DbId,
    ) -> Result<Vec<Shot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shots
             WHERE project_id = ?1 AND scene_id = ?2
             ORDER BY shot_number ASC"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(project_id)
            .bind(scene_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shot. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no such shot exists in the project.
    pub async fn update(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        input: &UpdateShot,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE shots SET
                scene_id = COALESCE(?3, scene_id),
                shot_number = COALESCE(?4, shot_number),
                description = COALESCE(?5, description),
                duration_target_sec = COALESCE(?6, duration_target_sec),
                framing = COALESCE(?7, framing),
                camera_movement = COALESCE(?8, camera_movement),
                camera_notes = COALESCE(?9, camera_notes),
                production_status = COALESCE(?10, production_status),
                intent = COALESCE(?11, intent),
                shot_constraint = COALESCE(?12, shot_constraint),
                emission = COALESCE(?13, emission),
                sound_design = COALESCE(?14, sound_design),
                volume_layers = COALESCE(?15, volume_layers),
                spatial = COALESCE(?16, spatial),
                narrative = COALESCE(?17, narrative),
                audio_exclude = COALESCE(?18, audio_exclude),
                transition_in = COALESCE(?19, transition_in),
                transition_out = COALESCE(?20, transition_out),
                first_frame_url = COALESCE(?21, first_frame_url),
                last_frame_url = COALESCE(?22, last_frame_url),
                reference_images = COALESCE(?23, reference_images),
                reference_frame_url = COALESCE(?24, reference_frame_url),
                generated_asset_url = COALESCE(?25, generated_asset_url),
                notes = COALESCE(?26, notes),
                updated_at = ?27
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.scene_id)
            .bind(input.shot_number)
            .bind(&input.description)
            .bind(input.duration_target_sec)
            .bind(&input.framing)
            .bind(&input.camera_movement)
            .bind(&input.camera_notes)
            .bind(&input.production_status)
            .bind(&input.intent)
            .bind(&input.constraint)
            .bind(&input.emission)
            .bind(&input.sound_design)
            .bind(&input.volume_layers)
            .bind(&input.spatial)
            .bind(&input.narrative)
            .bind(&input.exclude)
            .bind(&input.transition_in)
            .bind(&input.transition_out)
            .bind(&input.first_frame_url)
            .bind(&input.last_frame_url)
            .bind(input.reference_images.as_ref().map(Json))
            .bind(&input.reference_frame_url)
            .bind(&input.generated_asset_url)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Set one shot's production status. Returns `None` if the shot is absent.
    pub async fn set_status(
        pool: &SqlitePool,
        project_id: DbId,
        id: DbId,
        status: ProductionStage,
    ) -> Result<Option<Shot>, sqlx::Error> {
        let query = format!(
            "UPDATE shots SET production_status = ?3, updated_at = ?4
             WHERE id = ?1 AND project_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shot>(&query)
            .bind(id)
            .bind(project_id)
            .bind(status.as_str())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Set the same status on several shots in one transaction.
    ///
    /// Returns the number of rows updated; ids outside the project are
    /// ignored, so callers that require every id to exist check first.
    pub async fn batch_set_status(
        pool: &SqlitePool,
        project_id: DbId,
        ids: &[DbId],
        status: ProductionStage,
    ) -> Result<u64, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for id in ids {
            let result = sqlx::query(
                "UPDATE shots SET production_status = ?3, updated_at = ?4
                 WHERE id = ?1 AND project_id = ?2",
            )
            .bind(id)
            .bind(project_id)
            .bind(status.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    /// Apply a reorder plan atomically.
    ///
    /// Numbers are first moved to their negatives so the
    /// `(project_id, shot_number)` unique constraint holds at every step.
    pub async fn apply_reorder(
        pool: &SqlitePool,
        project_id: DbId,
        plan: &ReorderPlan,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        for (id, number) in &plan.assignments {
            sqlx::query("UPDATE shots SET shot_number = ?3 WHERE id = ?1 AND project_id = ?2")
                .bind(id)
                .bind(project_id)
                .bind(-number)
                .execute(&mut *tx)
                .await?;
        }
        for (id, number) in &plan.assignments {
            sqlx::query(
                "UPDATE shots SET shot_number = ?3, updated_at = ?4
                 WHERE id = ?1 AND project_id = ?2",
            )
            .bind(id)
            .bind(project_id)
            .bind(number)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Delete a shot. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shots WHERE id = ?1 AND project_id = ?2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Status and duration of every shot in a project.
    pub async fn progress_for_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<ShotProgress>, sqlx::Error> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT production_status, duration_target_sec FROM shots WHERE project_id = ?1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(into_progress).collect())
    }

    /// Status and duration of every shot across all projects.
    pub async fn progress_all(pool: &SqlitePool) -> Result<Vec<ShotProgress>, sqlx::Error> {
        let rows: Vec<(String, f64)> =
            sqlx::query_as("SELECT production_status, duration_target_sec FROM shots")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(into_progress).collect())
    }
}

fn into_progress((production_status, duration_target_sec): (String, f64)) -> ShotProgress {
    ShotProgress {
        production_status,
        duration_target_sec,
    }
}
