//! Small top-level routes: vocabularies and the example seed.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{enums, seed};
use crate::state::AppState;

/// ```text
/// GET  /enums       -> vocabularies
/// POST /seed/mito   -> seed example project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enums", get(enums::list))
        .route("/seed/mito", post(seed::seed_mito))
}
