//! Domain rules for StoryForge.
//!
//! This crate has no internal dependencies so the repository, compiler
//! and API layers can all share the same pipeline, ordering and
//! validation logic.

pub mod error;
pub mod ordering;
pub mod pipeline;
pub mod stats;
pub mod types;
pub mod validation;
pub mod vocabulary;
