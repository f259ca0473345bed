//! Parsing of model output.

use serde_json::{Map, Value};

/// Outcome of a compilation that reached the model.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileOutput {
    /// The JSON object the model produced, kept as-is. Keys the prompt asks
    /// for (`image_prompt`, `video_prompt`, `audio_stack`, ...) may be
    /// missing or differently shaped; unknown keys are preserved.
    Compiled(Map<String, Value>),
    /// The model did not return a JSON object.
    ParseFailed { raw_response: String },
}

impl CompileOutput {
    /// `compiled` or `parse_failed`.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Compiled(_) => "compiled",
            Self::ParseFailed { .. } => "parse_failed",
        }
    }

    /// The result payload as returned to clients and stored in history.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Compiled(prompts) => Value::Object(prompts.clone()),
            Self::ParseFailed { raw_response } => {
                serde_json::json!({ "raw_response": raw_response })
            }
        }
    }
}

/// Strip a surrounding markdown code fence, if any.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") {
        if let Some(start) = trimmed.find('\n') {
            let body = &trimmed[start + 1..];
            if let Some(end) = body.rfind("```") {
                return body[..end].trim();
            }
        }
    }
    trimmed
}

/// Parse compiler output. Any JSON object counts as compiled.
pub fn parse_compiled(text: &str) -> CompileOutput {
    match serde_json::from_str::<Value>(extract_json(text)) {
        Ok(Value::Object(prompts)) => CompileOutput::Compiled(prompts),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "Compiler output was not a JSON object");
            CompileOutput::ParseFailed {
                raw_response: text.to_string(),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Compiler output was not valid JSON");
            CompileOutput::ParseFailed {
                raw_response: text.to_string(),
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse free-form JSON output (used by image describe). Returns the raw
/// text wrapped as `{"raw_response": ...}` when it is not a JSON object.
pub fn parse_object(text: &str) -> (bool, Value) {
    match serde_json::from_str::<Value>(extract_json(text)) {
        Ok(value @ Value::Object(_)) => (true, value),
        _ => (false, serde_json::json!({ "raw_response": text })),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const FULL: &str = r#"{
        "image_prompt": "A glowing orb",
        "video_prompt": "Slow push in",
        "audio_stack": {"sound_design": "hum", "exclude": "music"},
        "director_notes": "Hold two beats",
        "coherence_flags": ["check palette"]
    }"#;

    #[test]
    fn parses_plain_json() {
        let out = parse_compiled(FULL);
        assert_eq!(out.status(), "compiled");
        assert_matches!(out, CompileOutput::Compiled(p) if p["image_prompt"] == "A glowing orb"
            && p["audio_stack"]["exclude"] == "music"
            && p["coherence_flags"] == serde_json::json!(["check palette"]));
    }

    #[test]
    fn loosely_shaped_object_is_still_compiled() {
        let out = parse_compiled(
            r#"{"image_prompt":"orb","video_prompt":"push","coherence_flags":"none","audio_stack":"hum"}"#,
        );
        assert_eq!(out.status(), "compiled");
        let value = out.to_value();
        assert_eq!(value["image_prompt"], "orb");
        assert_eq!(value["coherence_flags"], "none");
        assert_eq!(value["audio_stack"], "hum");
    }

    #[test]
    fn unknown_keys_are_kept() {
        let value = parse_compiled(r#"{"image_prompt":"orb","negative_prompt":"blur"}"#).to_value();
        assert_eq!(value["image_prompt"], "orb");
        assert_eq!(value["negative_prompt"], "blur");
    }

    #[test]
    fn strips_markdown_fence() {
        let fenced = format!("```json\n{FULL}\n```");
        assert_eq!(parse_compiled(&fenced).status(), "compiled");
    }

    #[test]
    fn non_json_falls_back_to_raw_text() {
        let out = parse_compiled("Sorry, I can't help with that.");
        assert_eq!(out.status(), "parse_failed");
        assert_eq!(
            out.to_value(),
            serde_json::json!({"raw_response": "Sorry, I can't help with that."})
        );
    }

    #[test]
    fn json_array_is_not_compiled() {
        assert_eq!(parse_compiled("[1, 2]").status(), "parse_failed");
    }

    #[test]
    fn extract_json_leaves_unfenced_text() {
        assert_eq!(extract_json("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(extract_json("```\nno close"), "```\nno close");
    }

    #[test]
    fn parse_object_accepts_only_objects() {
        let (ok, value) = parse_object("```json\n{\"name\": \"Forest\"}\n```");
        assert!(ok);
        assert_eq!(value["name"], "Forest");

        let (ok, value) = parse_object("a forest");
        assert!(!ok);
        assert_eq!(value["raw_response"], "a forest");
    }
}
