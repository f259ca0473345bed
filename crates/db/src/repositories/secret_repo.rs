//! Repository for the `secrets` table.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::secret::Secret;

/// Provides key/value storage for integration credentials.
pub struct SecretRepo;

impl SecretRepo {
    /// List all secrets ordered by key.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Secret>, sqlx::Error> {
        sqlx::query_as::<_, Secret>("SELECT key, value, updated_at FROM secrets ORDER BY key ASC")
            .fetch_all(pool)
            .await
    }

    /// Fetch the value stored under `key`.
    pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT value FROM secrets WHERE key = ?1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace a secret.
    pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<Secret, sqlx::Error> {
        sqlx::query_as::<_, Secret>(
            "INSERT INTO secrets (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT (key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at
             RETURNING key, value, updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// Delete a secret. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM secrets WHERE key = ?1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
