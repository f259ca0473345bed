//! Compiler prompt construction.
//!
//! The context types are plain data assembled by the caller from stored
//! entities. They serialize so the exact input of a compilation can be
//! recorded alongside its output.

use serde::{Deserialize, Serialize};

pub const COMPILER_SYSTEM_PROMPT: &str = r#"You are StoryForge Scene Compiler, an expert AI cinematographer and production designer.
You take natural language scene descriptions and generate structured production prompts.

You MUST output a JSON object with these exact keys:
{
  "image_prompt": "A detailed prompt for image generation. Be specific about composition, lighting, color palette, mood, and subjects.",
  "video_prompt": "A prompt for video generation. Describe motion, camera movement, timing, and action.",
  "audio_stack": {
    "sound_design": "Primary environmental and foley sound elements",
    "volume_layers": "BACKGROUND: [element] at [level] | MIDGROUND: [element] at [level] | FOREGROUND: [element] at [level]",
    "spatial": "Spatial positioning, movement, and stereo/surround placement",
    "narrative": "Emotional beats and narrative function of the audio",
    "exclude": "Elements to explicitly exclude from audio generation"
  },
  "director_notes": "Brief suggestions for blocking, timing and transitions",
  "continuity_notes": "How this shot connects visually to the previous and next frames",
  "coherence_flags": ["Any potential inconsistencies with the established world/character bible"]
}

RULES:
- Honor the brand config and compliance rails; never include forbidden elements
- Reference the world's established atmosphere and lighting
- Keep characters visually consistent with their identity sheets
- When continuity frames are given, match their composition and lighting at the cut
- The audio stack follows the Intent / Constraint / Emission architecture
- Output ONLY valid JSON, no markdown wrapping"#;

/// Project-level brand and compliance rails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandContext {
    pub project_name: String,
    pub brand_primary: String,
    pub brand_secondary: String,
    pub visual_style: String,
    pub aspect_ratio: String,
    pub compliance_notes: Vec<String>,
    pub forbidden_elements: Vec<String>,
    pub required_elements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldContext {
    pub name: String,
    pub description: String,
    pub emotional_zone: String,
    pub atmosphere: String,
    pub lighting_notes: String,
    pub spatial_character: String,
    pub marble_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterContext {
    pub name: String,
    pub role: String,
    pub description: String,
    pub personality: String,
    pub visual_notes: String,
    pub voice_profile: String,
}

/// Camera and environment parameters for the shot being compiled.
///
/// `time_of_day` and `weather` are already resolved against the project
/// defaults by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotParameters {
    pub emotional_zone: String,
    pub framing: String,
    pub camera_movement: String,
    pub time_of_day: String,
    pub weather: String,
    pub duration_target_sec: Option<f64>,
}

/// Frames of the neighbouring shots on the project timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContinuityContext {
    pub previous_last_frame_url: Option<String>,
    pub next_first_frame_url: Option<String>,
}

impl ContinuityContext {
    pub fn is_empty(&self) -> bool {
        self.previous_last_frame_url.is_none() && self.next_first_frame_url.is_none()
    }
}

/// Everything the compiler needs for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileContext {
    pub brand: BrandContext,
    pub world: Option<WorldContext>,
    pub characters: Vec<CharacterContext>,
    pub shot: ShotParameters,
    pub continuity: ContinuityContext,
    pub reference_images: Vec<String>,
    pub scene_description: String,
    pub additional_context: String,
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Render the user message for a compilation.
///
/// Sections are emitted in a fixed order: brand, world, characters, shot
/// parameters, continuity, references, additional context and finally
/// the scene description. Empty optional sections are omitted.
pub fn build_user_prompt(ctx: &CompileContext) -> String {
    let mut lines: Vec<String> = Vec::new();
    let b = &ctx.brand;

    lines.push(format!("PROJECT: {}", b.project_name));
    lines.push(format!("Primary Brand: {}", b.brand_primary));
    lines.push(format!("Secondary Brand: {}", b.brand_secondary));
    lines.push(format!("Visual Style: {}", b.visual_style));
    lines.push(format!("Aspect Ratio: {}", b.aspect_ratio));
    lines.push(format!("Compliance: {}", join_or_none(&b.compliance_notes)));
    lines.push(format!("Forbidden Elements: {}", join_or_none(&b.forbidden_elements)));
    lines.push(format!("Required Elements: {}", join_or_none(&b.required_elements)));

    if let Some(w) = &ctx.world {
        lines.push(String::new());
        lines.push(format!("WORLD/LOCATION: {}", w.name));
        lines.push(format!("Description: {}", w.description));
        lines.push(format!("Emotional Zone: {}", w.emotional_zone));
        lines.push(format!("Atmosphere: {}", w.atmosphere));
        lines.push(format!("Lighting: {}", w.lighting_notes));
        lines.push(format!("Spatial Character: {}", w.spatial_character));
        if !w.marble_url.is_empty() {
            lines.push(format!("Marble URL: {}", w.marble_url));
        }
    }

    for c in &ctx.characters {
        lines.push(String::new());
        lines.push(format!("CHARACTER: {} ({})", c.name, c.role));
        lines.push(format!("Description: {}", c.description));
        lines.push(format!("Personality: {}", c.personality));
        lines.push(format!("Visual Notes: {}", c.visual_notes));
        lines.push(format!("Voice: {}", c.voice_profile));
    }

    let s = &ctx.shot;
    lines.push(String::new());
    lines.push("SHOT PARAMETERS:".to_string());
    lines.push(format!("Emotional Zone: {}", s.emotional_zone));
    lines.push(format!("Framing: {}", s.framing));
    lines.push(format!("Camera Movement: {}", s.camera_movement));
    lines.push(format!("Time of Day: {}", s.time_of_day));
    lines.push(format!("Weather: {}", s.weather));
    if let Some(secs) = s.duration_target_sec {
        lines.push(format!("Target Duration: {secs}s"));
    }

    if !ctx.continuity.is_empty() {
        lines.push(String::new());
        lines.push("CONTINUITY:".to_string());
        if let Some(url) = &ctx.continuity.previous_last_frame_url {
            lines.push(format!("Previous shot last frame: {url}"));
        }
        if let Some(url) = &ctx.continuity.next_first_frame_url {
            lines.push(format!("Next shot first frame: {url}"));
        }
    }

    if !ctx.reference_images.is_empty() {
        lines.push(String::new());
        lines.push("REFERENCE IMAGES:".to_string());
        for url in &ctx.reference_images {
            lines.push(format!("- {url}"));
        }
    }

    if !ctx.additional_context.trim().is_empty() {
        lines.push(String::new());
        lines.push(format!("Additional Context: {}", ctx.additional_context.trim()));
    }

    lines.push(String::new());
    lines.push("SCENE DESCRIPTION:".to_string());
    lines.push(ctx.scene_description.clone());
    lines.push(String::new());
    lines.push("Generate the structured production prompts as JSON.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CompileContext {
        CompileContext {
            brand: BrandContext {
                project_name: "Mito".to_string(),
                forbidden_elements: vec!["gore".to_string(), "logos".to_string()],
                ..Default::default()
            },
            shot: ShotParameters {
                emotional_zone: "tense".to_string(),
                framing: "close".to_string(),
                camera_movement: "dolly_in".to_string(),
                time_of_day: "night".to_string(),
                weather: "rain".to_string(),
                duration_target_sec: None,
            },
            scene_description: "A door creaks open.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn includes_brand_rails_and_shot_parameters() {
        let prompt = build_user_prompt(&context());
        assert!(prompt.contains("PROJECT: Mito"));
        assert!(prompt.contains("Forbidden Elements: gore, logos"));
        assert!(prompt.contains("Compliance: none"));
        assert!(prompt.contains("Framing: close"));
        assert!(prompt.contains("Weather: rain"));
        assert!(prompt.ends_with("Generate the structured production prompts as JSON."));
    }

    #[test]
    fn omits_empty_optional_sections() {
        let prompt = build_user_prompt(&context());
        assert!(!prompt.contains("WORLD/LOCATION"));
        assert!(!prompt.contains("CHARACTER:"));
        assert!(!prompt.contains("CONTINUITY:"));
        assert!(!prompt.contains("REFERENCE IMAGES:"));
        assert!(!prompt.contains("Additional Context"));
    }

    #[test]
    fn renders_world_characters_and_continuity() {
        let mut ctx = context();
        ctx.world = Some(WorldContext {
            name: "The Wasteland".to_string(),
            ..Default::default()
        });
        ctx.characters = vec![CharacterContext {
            name: "Mito".to_string(),
            role: "Protagonist".to_string(),
            ..Default::default()
        }];
        ctx.continuity.previous_last_frame_url = Some("https://f/prev.png".to_string());
        ctx.additional_context = "  slow build  ".to_string();

        let prompt = build_user_prompt(&ctx);
        assert!(prompt.contains("WORLD/LOCATION: The Wasteland"));
        assert!(prompt.contains("CHARACTER: Mito (Protagonist)"));
        assert!(prompt.contains("Previous shot last frame: https://f/prev.png"));
        assert!(!prompt.contains("Next shot first frame"));
        assert!(prompt.contains("Additional Context: slow build\n"));
    }

    #[test]
    fn scene_description_comes_last() {
        let prompt = build_user_prompt(&context());
        let params = prompt.find("SHOT PARAMETERS").unwrap();
        let scene = prompt.find("SCENE DESCRIPTION").unwrap();
        assert!(scene > params);
    }
}
