//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Child-entity lookups
//! are always scoped by `project_id`.

pub mod character_repo;
pub mod compilation_repo;
pub mod dashboard_repo;
pub mod object_repo;
pub mod project_repo;
pub mod scene_repo;
pub mod secret_repo;
pub mod shot_repo;
pub mod world_repo;

pub use character_repo::CharacterRepo;
pub use compilation_repo::CompilationRepo;
pub use dashboard_repo::DashboardRepo;
pub use object_repo::ObjectRepo;
pub use project_repo::ProjectRepo;
pub use scene_repo::SceneRepo;
pub use secret_repo::SecretRepo;
pub use shot_repo::ShotRepo;
pub use world_repo::WorldRepo;
