//! Scene compiler: turns a scene/shot context into generation prompts by
//! calling an OpenAI-compatible chat completions API.
//!
//! The HTTP client sits behind the [`llm::LlmBackend`] trait so callers
//! (and tests) can substitute their own backend.

pub mod compiler;
pub mod describe;
pub mod llm;
pub mod output;
pub mod prompt;

pub use compiler::SceneCompiler;
pub use llm::{LlmBackend, LlmClient, LlmError, LlmSettings};
