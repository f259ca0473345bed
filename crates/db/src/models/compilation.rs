//! Compilation record model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use storyforge_core::types::{DbId, Timestamp};

/// The model returned structured JSON.
pub const COMPILATION_STATUS_COMPILED: &str = "compiled";

/// The model answered but its output was not valid JSON; `output` holds
/// the raw text under `raw_response`.
pub const COMPILATION_STATUS_PARSE_FAILED: &str = "parse_failed";

/// A row from the `compilations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Compilation {
    pub id: DbId,
    pub project_id: DbId,
    /// Originating shot; cleared when the shot is deleted.
    pub shot_id: Option<DbId>,
    pub status: String,
    pub input: Json<serde_json::Value>,
    pub output: Json<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for recording a compilation.
#[derive(Debug, Clone)]
pub struct CreateCompilation {
    pub project_id: DbId,
    pub shot_id: Option<DbId>,
    pub status: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}
