//! Route definitions for the `/projects` resource and everything nested
//! under `/projects/{project_id}/...`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{character, compiler, continuity, object, project, scene, shot, world};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                     -> list
/// POST   /                                     -> create
/// GET    /{project_id}                         -> get_by_id
/// PUT    /{project_id}                         -> update
/// DELETE /{project_id}                         -> delete
/// GET    /{project_id}/export                  -> export
///
/// GET    /{project_id}/worlds                  -> list_by_project
/// POST   /{project_id}/worlds                  -> create
/// GET    /{project_id}/worlds/{id}             -> get_by_id
/// PUT    /{project_id}/worlds/{id}             -> update
/// DELETE /{project_id}/worlds/{id}             -> delete
///
/// (characters, objects and scenes follow the same shape)
///
/// GET    /{project_id}/shots                   -> list (?scene_id=)
/// POST   /{project_id}/shots                   -> create
/// POST   /{project_id}/shots/batch-status      -> batch_status
/// POST   /{project_id}/shots/reorder           -> reorder
/// GET    /{project_id}/shots/{id}              -> get_by_id
/// PUT    /{project_id}/shots/{id}              -> update
/// DELETE /{project_id}/shots/{id}              -> delete
/// PATCH  /{project_id}/shots/{id}/status       -> set_status (?status=)
/// POST   /{project_id}/shots/{id}/advance      -> advance
///
/// GET    /{project_id}/continuity              -> chain
/// POST   /{project_id}/compile                 -> compile
/// POST   /{project_id}/batch-compile           -> batch_compile
/// GET    /{project_id}/compilations            -> list_compilations (?shot_id=)
/// POST   /{project_id}/describe-image          -> describe_image
/// ```
pub fn router() -> Router<AppState> {
    let world_routes = Router::new()
        .route("/", get(world::list_by_project).post(world::create))
        .route(
            "/{id}",
            get(world::get_by_id).put(world::update).delete(world::delete),
        );

    let character_routes = Router::new()
        .route("/", get(character::list_by_project).post(character::create))
        .route(
            "/{id}",
            get(character::get_by_id)
                .put(character::update)
                .delete(character::delete),
        );

    let object_routes = Router::new()
        .route("/", get(object::list_by_project).post(object::create))
        .route(
            "/{id}",
            get(object::get_by_id).put(object::update).delete(object::delete),
        );

    let scene_routes = Router::new()
        .route("/", get(scene::list_by_project).post(scene::create))
        .route(
            "/{id}",
            get(scene::get_by_id).put(scene::update).delete(scene::delete),
        );

    let shot_routes = Router::new()
        .route("/", get(shot::list).post(shot::create))
        .route("/batch-status", post(shot::batch_status))
        .route("/reorder", post(shot::reorder))
        .route(
            "/{id}",
            get(shot::get_by_id).put(shot::update).delete(shot::delete),
        )
        .route("/{id}/status", patch(shot::set_status))
        .route("/{id}/advance", post(shot::advance));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{project_id}/export", get(project::export))
        .route("/{project_id}/continuity", get(continuity::chain))
        .route("/{project_id}/compile", post(compiler::compile))
        .route("/{project_id}/batch-compile", post(compiler::batch_compile))
        .route("/{project_id}/compilations", get(compiler::list_compilations))
        .route("/{project_id}/describe-image", post(compiler::describe_image))
        .nest("/{project_id}/worlds", world_routes)
        .nest("/{project_id}/characters", character_routes)
        .nest("/{project_id}/objects", object_routes)
        .nest("/{project_id}/scenes", scene_routes)
        .nest("/{project_id}/shots", shot_routes)
}
