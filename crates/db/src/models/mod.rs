//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod character;
pub mod compilation;
pub mod dashboard;
pub mod object;
pub mod project;
pub mod scene;
pub mod secret;
pub mod shot;
pub mod world;
