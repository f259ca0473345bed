use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::secrets;
use crate::state::AppState;

/// Routes mounted at `/secrets`.
///
/// ```text
/// GET    /        -> list (masked)
/// PUT    /        -> upsert
/// DELETE /{key}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(secrets::list).put(secrets::upsert))
        .route("/{key}", delete(secrets::delete))
}
