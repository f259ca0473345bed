//! Handlers for stored integration secrets.
//!
//! Values are write-only over the API: listings and upsert responses only
//! ever carry the masked form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storyforge_core::error::CoreError;
use storyforge_db::models::secret::{MaskedSecret, UpsertSecret};
use storyforge_db::repositories::SecretRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/secrets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MaskedSecret>>> {
    let secrets = SecretRepo::list(&state.pool).await?;
    Ok(Json(secrets.into_iter().map(MaskedSecret::from).collect()))
}

/// PUT /api/secrets
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertSecret>,
) -> AppResult<Json<MaskedSecret>> {
    if input.key.trim().is_empty() {
        return Err(CoreError::Validation("key must not be empty".to_string()).into());
    }
    if input.value.is_empty() {
        return Err(CoreError::Validation("value must not be empty".to_string()).into());
    }
    let secret = SecretRepo::upsert(&state.pool, input.key.trim(), &input.value).await?;
    tracing::info!(key = %secret.key, "Secret stored");
    Ok(Json(secret.into()))
}

/// DELETE /api/secrets/{key}
pub async fn delete(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    if SecretRepo::delete(&state.pool, &key).await? {
        tracing::info!(%key, "Secret deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Secret '{key}' not found")))
    }
}
