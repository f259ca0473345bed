//! High-level compiler operations over an [`LlmBackend`].

use std::sync::Arc;

use crate::describe::{build_describe_prompt, EntityKind, DESCRIBE_SYSTEM_PROMPT};
use crate::llm::{CompletionRequest, LlmBackend, LlmError};
use crate::output::{parse_compiled, parse_object, CompileOutput};
use crate::prompt::{build_user_prompt, CompileContext, COMPILER_SYSTEM_PROMPT};

/// Result of an image describe call.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeOutput {
    /// `described` when the model returned a JSON object, else `parse_failed`.
    pub status: &'static str,
    pub result: serde_json::Value,
}

/// Scene compiler bound to one LLM backend. Cheap to clone.
#[derive(Clone)]
pub struct SceneCompiler {
    backend: Arc<dyn LlmBackend>,
}

impl SceneCompiler {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Compile a scene/shot context into generation prompts.
    ///
    /// Upstream failures are returned as errors; a reply that is not valid
    /// JSON is a successful [`CompileOutput::ParseFailed`].
    pub async fn compile(
        &self,
        ctx: &CompileContext,
        api_key: Option<String>,
    ) -> Result<CompileOutput, LlmError> {
        let request = CompletionRequest {
            system: COMPILER_SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(ctx),
            image_urls: Vec::new(),
            api_key,
        };
        let text = self.backend.complete(&request).await?;
        let output = parse_compiled(&text);
        tracing::debug!(status = output.status(), chars = text.len(), "Compilation finished");
        Ok(output)
    }

    /// Ask the model to draft an entity from a reference image.
    pub async fn describe_image(
        &self,
        image_url: &str,
        kind: EntityKind,
        emotional_zones: &[&str],
        additional_context: &str,
        api_key: Option<String>,
    ) -> Result<DescribeOutput, LlmError> {
        let request = CompletionRequest {
            system: DESCRIBE_SYSTEM_PROMPT.to_string(),
            user: build_describe_prompt(kind, emotional_zones, additional_context),
            image_urls: vec![image_url.to_string()],
            api_key,
        };
        let text = self.backend.complete(&request).await?;
        let (ok, result) = parse_object(&text);
        Ok(DescribeOutput {
            status: if ok { "described" } else { "parse_failed" },
            result,
        })
    }
}
