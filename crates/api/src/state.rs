use std::sync::Arc;

use storyforge_compiler::SceneCompiler;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storyforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Scene compiler bound to the configured LLM backend.
    pub compiler: SceneCompiler,
}
