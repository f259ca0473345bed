//! Image describe: draft a world, character or object from a reference
//! image.

use serde::{Deserialize, Serialize};

/// Kind of entity to draft from an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    World,
    Character,
    Object,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Character => "character",
            Self::Object => "object",
        }
    }

    /// JSON keys the model is asked to fill for this kind.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::World => &[
                "name",
                "description",
                "emotional_zone",
                "atmosphere",
                "time_of_day",
                "weather",
                "spatial_character",
                "lighting_notes",
            ],
            Self::Character => &[
                "name",
                "role",
                "description",
                "personality",
                "visual_notes",
                "voice_profile",
            ],
            Self::Object => &[
                "name",
                "category",
                "description",
                "narrative_significance",
                "usage_notes",
            ],
        }
    }
}

pub const DESCRIBE_SYSTEM_PROMPT: &str = "You are StoryForge's visual development assistant. \
You look at a reference image and write a production bible entry for it. \
Output ONLY a valid JSON object, no markdown wrapping.";

/// Render the user message for an image describe request.
pub fn build_describe_prompt(kind: EntityKind, emotional_zones: &[&str], additional_context: &str) -> String {
    let mut prompt = format!(
        "Describe the attached image as a production bible entry of type `{}`.\n\
         Return a JSON object with exactly these keys: {}.",
        kind.as_str(),
        kind.fields().join(", ")
    );
    if kind == EntityKind::World && !emotional_zones.is_empty() {
        prompt.push_str(&format!(
            "\n`emotional_zone` must be one of: {}.",
            emotional_zones.join(", ")
        ));
    }
    let extra = additional_context.trim();
    if !extra.is_empty() {
        prompt.push_str(&format!("\nAdditional Context: {extra}"));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_kind_specific_fields() {
        let prompt = build_describe_prompt(EntityKind::Object, &[], "");
        assert!(prompt.contains("of type `object`"));
        assert!(prompt.contains("narrative_significance"));
        assert!(!prompt.contains("Additional Context"));
    }

    #[test]
    fn world_prompt_constrains_emotional_zone() {
        let prompt = build_describe_prompt(EntityKind::World, &["tense", "liminal"], "night market");
        assert!(prompt.contains("must be one of: tense, liminal"));
        assert!(prompt.contains("Additional Context: night market"));
    }

    #[test]
    fn kind_deserializes_from_snake_case() {
        let kind: EntityKind = serde_json::from_str("\"character\"").unwrap();
        assert_eq!(kind, EntityKind::Character);
        assert!(serde_json::from_str::<EntityKind>("\"vehicle\"").is_err());
    }
}
