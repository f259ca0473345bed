pub mod dashboard;
pub mod health;
pub mod misc;
pub mod project;
pub mod secrets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          service health
///
/// /projects                                        list (with stats), create
/// /projects/{id}                                   get (with stats), update, delete
/// /projects/{id}/export                            export bundle
/// /projects/{project_id}/worlds                    list, create
/// /projects/{project_id}/worlds/{id}               get, update, delete
/// /projects/{project_id}/characters                list, create
/// /projects/{project_id}/characters/{id}           get, update, delete
/// /projects/{project_id}/objects                   list, create
/// /projects/{project_id}/objects/{id}              get, update, delete
/// /projects/{project_id}/scenes                    list (with shot_count), create
/// /projects/{project_id}/scenes/{id}               get, update, delete
/// /projects/{project_id}/shots                     list (?scene_id=), create
/// /projects/{project_id}/shots/batch-status        batch status (POST)
/// /projects/{project_id}/shots/reorder             reorder scene (POST)
/// /projects/{project_id}/shots/{id}                get, update, delete
/// /projects/{project_id}/shots/{id}/status         set status (PATCH ?status=)
/// /projects/{project_id}/shots/{id}/advance        advance one stage (POST)
/// /projects/{project_id}/continuity                continuity chain
/// /projects/{project_id}/compile                   compile (POST)
/// /projects/{project_id}/batch-compile             compile shots (POST)
/// /projects/{project_id}/compilations              history (?shot_id=)
/// /projects/{project_id}/describe-image            draft entity from image (POST)
///
/// /secrets                                         list (masked), upsert (PUT)
/// /secrets/{key}                                   delete
///
/// /dashboard/stats                                 global statistics
/// /enums                                           vocabularies
/// /seed/mito                                       seed example project (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .nest("/secrets", secrets::router())
        .nest("/dashboard", dashboard::router())
        .merge(misc::router())
}
