//! The bundled "Mito" example project.
//!
//! Seeding is idempotent on the project name: a second run reports the
//! existing project instead of creating a duplicate.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;
use storyforge_core::types::DbId;

use crate::models::character::CreateCharacter;
use crate::models::project::CreateProject;
use crate::models::scene::CreateScene;
use crate::models::shot::CreateShot;
use crate::models::world::CreateWorld;
use crate::repositories::{CharacterRepo, ProjectRepo, SceneRepo, ShotRepo, WorldRepo};

pub const EXAMPLE_PROJECT_NAME: &str = "Mito: The Animated Short";

/// Result of a seed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    Seeded {
        project_id: DbId,
        worlds: usize,
        characters: usize,
        scenes: usize,
        shots: usize,
    },
    AlreadySeeded {
        project_id: DbId,
    },
}

impl SeedOutcome {
    pub fn project_id(&self) -> DbId {
        match self {
            Self::Seeded { project_id, .. } | Self::AlreadySeeded { project_id } => *project_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

struct WorldSeed {
    name: &'static str,
    description: &'static str,
    emotional_zone: &'static str,
    atmosphere: &'static str,
    spatial_character: &'static str,
    lighting_notes: &'static str,
}

const WORLDS: &[WorldSeed] = &[
    WorldSeed {
        name: "The Cellular Interior",
        description: "Inside a living cell: mitochondria, organelles, flowing cytoplasm. Bioluminescent structures pulse with energy.",
        emotional_zone: "intimate",
        atmosphere: "Warm, alive, pulsing with potential",
        spatial_character: "intimate/enclosed",
        lighting_notes: "Bioluminescent. Soft blue-green glow from organelles, warm amber from energy production",
    },
    WorldSeed {
        name: "The Neural Network",
        description: "Vast interconnected pathways of neurons firing. Synaptic gaps bridged by light. Scale shifts from microscopic to cosmic.",
        emotional_zone: "revelatory",
        atmosphere: "Electric, expansive, awe-inspiring",
        spatial_character: "vast/infinite",
        lighting_notes: "Electric blue synaptic flashes against deep purple void",
    },
    WorldSeed {
        name: "The Wasteland",
        description: "A depleted, toxic cellular environment. Damaged structures, dim light, entropy visible.",
        emotional_zone: "desolate",
        atmosphere: "Decayed, threatening, suffocating",
        spatial_character: "vast/barren",
        lighting_notes: "Dim, desaturated, occasional sickly yellow-green",
    },
    WorldSeed {
        name: "The Scalar Field",
        description: "Abstract energy patterns: standing waves, interference patterns, golden ratio spirals.",
        emotional_zone: "transcendent",
        atmosphere: "Pure energy, mathematical beauty, transcendence",
        spatial_character: "infinite/unbounded",
        lighting_notes: "Pure white-gold energy with prismatic refractions",
    },
    WorldSeed {
        name: "The Awakening Chamber",
        description: "Where Mito first encounters the scalar field. A threshold space between the damaged cell and regeneration.",
        emotional_zone: "liminal",
        atmosphere: "Transitional, pregnant with possibility",
        spatial_character: "threshold/between",
        lighting_notes: "Gradient from cold blue to warm gold; the transformation is visible in light",
    },
];

struct CharacterSeed {
    name: &'static str,
    role: &'static str,
    description: &'static str,
    personality: &'static str,
    voice_profile: &'static str,
    visual_notes: &'static str,
    motivation_notes: &'static str,
    arc_summary: &'static str,
}

const CHARACTERS: &[CharacterSeed] = &[
    CharacterSeed {
        name: "Mito",
        role: "Protagonist",
        description: "A mitochondrial entity, small, luminous and curious. Begins depleted and dim, gradually brightens as it encounters the scalar field.",
        personality: "Curious, resilient, innocent but growing in wisdom",
        voice_profile: "Childlike wonder evolving to quiet authority",
        visual_notes: "Bioluminescent orb with internal structure visible. Color shifts from dim amber to radiant gold.",
        motivation_notes: "Survival, then understanding, then purpose, then service",
        arc_summary: "From depleted organelle to awakened energy being",
    },
    CharacterSeed {
        name: "The Signal",
        role: "Catalyst",
        description: "The scalar energy field personified as a presence. Not a character with a face; a wave, a resonance, a calling.",
        personality: "Patient, vast, impersonal but benevolent",
        voice_profile: "No voice. Expressed through harmonic frequencies and spatial audio",
        visual_notes: "Standing wave patterns, golden ratio spirals, interference patterns in light",
        motivation_notes: "Exists to activate, not to persuade",
        arc_summary: "Constant presence that Mito learns to perceive",
    },
];

struct SceneSeed {
    title: &'static str,
    synopsis: &'static str,
    emotional_zone: &'static str,
    narrative_purpose: &'static str,
    dramatic_tension: i32,
    /// Index into [`WORLDS`].
    world: usize,
    /// `(framing, camera_movement, duration_secs, description)`.
    shots: [(&'static str, &'static str, f64, &'static str); 3],
}

const SCENES: &[SceneSeed] = &[
    SceneSeed {
        title: "Diminished Light",
        synopsis: "Mito exists in a depleted cell. Low energy, damaged environment. We see the cost of toxicity.",
        emotional_zone: "desolate",
        narrative_purpose: "Establish stakes: what happens when cellular health fails",
        dramatic_tension: 3,
        world: 2,
        shots: [
            ("extreme_wide", "dolly_in", 8.0, "Vast depleted landscape. Mito barely visible."),
            ("close", "static", 5.0, "Mito's dim glow flickering."),
            ("medium", "pan_left", 6.0, "Damaged structures around Mito."),
        ],
    },
    SceneSeed {
        title: "The First Pulse",
        synopsis: "A faint signal reaches Mito. Something external, something new. The scalar field makes first contact.",
        emotional_zone: "liminal",
        narrative_purpose: "Inciting incident: hope enters the narrative",
        dramatic_tension: 5,
        world: 4,
        shots: [
            ("medium", "static", 5.0, "Mito senses something. Slight brightening."),
            ("wide", "crane_up", 7.0, "The scalar pulse arrives as a visible wave."),
            ("close", "dolly_in", 6.0, "Mito turns toward the signal."),
        ],
    },
    SceneSeed {
        title: "The Awakening",
        synopsis: "Mito enters the scalar field. Perception expands. The cell begins to regenerate.",
        emotional_zone: "revelatory",
        narrative_purpose: "Transformation: the core thesis made visible",
        dramatic_tension: 8,
        world: 3,
        shots: [
            ("extreme_wide", "orbit", 8.0, "Mito enters the scalar field. Explosion of light."),
            ("close", "static", 5.0, "Mito's internal structure transforming."),
            ("medium_wide", "tracking", 7.0, "Energy flowing through the cell."),
        ],
    },
    SceneSeed {
        title: "The Network",
        synopsis: "Mito discovers it's connected to millions of others. Neural pathways light up. Collective healing begins.",
        emotional_zone: "transcendent",
        narrative_purpose: "Scale shift: from individual to collective",
        dramatic_tension: 9,
        world: 1,
        shots: [
            ("extreme_wide", "crane_up", 8.0, "Neural network revealed. Millions of connections."),
            ("medium", "tracking", 6.0, "Following the signal along pathways."),
            ("wide", "orbit", 8.0, "Collective activation as cells light up."),
        ],
    },
    SceneSeed {
        title: "Radiance",
        synopsis: "The cell is restored. Mito pulses with full energy. A new signal goes out, calling the next cell.",
        emotional_zone: "triumphant",
        narrative_purpose: "Resolution and continuation: healing propagates",
        dramatic_tension: 7,
        world: 0,
        shots: [
            ("medium", "dolly_out", 6.0, "Mito at full radiance."),
            ("wide", "crane_up", 7.0, "The restored cell, vibrant and alive."),
            ("extreme_wide", "static", 8.0, "A new signal goes out. The cycle continues."),
        ],
    },
];

fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn example_project() -> CreateProject {
    let model_preferences: BTreeMap<String, String> = [
        ("image", "Nano Banana Pro"),
        ("video", "Veo 3.1"),
        ("world", "Marble (WorldLabs)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    CreateProject {
        name: EXAMPLE_PROJECT_NAME.to_string(),
        brand_primary: Some("Everything's Energy".to_string()),
        brand_secondary: Some("EESYS / EESystem".to_string()),
        description: Some(
            "A 5-minute animated short exploring consciousness, scalar energy, and cellular \
             healing through the journey of Mito, a mitochondrial entity awakening to its potential."
                .to_string(),
        ),
        visual_style: Some(
            "Cinematic, ethereal, bioluminescent. Cellular landscapes meeting cosmic vistas. \
             Color palette: deep indigos, electric teals, warm ambers for healing moments."
                .to_string(),
        ),
        default_time_of_day: Some("twilight".to_string()),
        default_weather: Some("clear".to_string()),
        default_lighting: Some("bioluminescent".to_string()),
        default_aspect_ratio: Some("16:9".to_string()),
        target_duration_sec: Some(300.0),
        compliance_notes: strings(&[
            "Content must respect the EESystem brand",
            "No medical claims; position as educational/exploratory",
            "Ethical sound design by construction",
        ]),
        forbidden_elements: strings(&[
            "Cheap emotional manipulation",
            "Horror tropes without purpose",
            "Generic stock imagery aesthetics",
        ]),
        required_elements: strings(&[
            "Consistent character identity across all shots",
            "Declarative media grammar (Intent/Constraint/Emission)",
            "Zone-aware audio design",
        ]),
        model_preferences: Some(model_preferences),
        tags: strings(&["animated_short", "eesystem", "consciousness", "healing"]),
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create the example project unless one with the same name exists.
pub async fn seed_example_project(pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
    if let Some(existing) = ProjectRepo::find_by_name(pool, EXAMPLE_PROJECT_NAME).await? {
        tracing::debug!(project_id = %existing.id, "Example project already present");
        return Ok(SeedOutcome::AlreadySeeded {
            project_id: existing.id,
        });
    }

    let project = ProjectRepo::create(pool, &example_project()).await?;

    let mut world_ids = Vec::with_capacity(WORLDS.len());
    for w in WORLDS {
        let input = CreateWorld {
            name: w.name.to_string(),
            description: Some(w.description.to_string()),
            emotional_zone: Some(w.emotional_zone.to_string()),
            atmosphere: Some(w.atmosphere.to_string()),
            spatial_character: Some(w.spatial_character.to_string()),
            lighting_notes: Some(w.lighting_notes.to_string()),
            ..Default::default()
        };
        world_ids.push(WorldRepo::create(pool, project.id, &input).await?.id);
    }

    let mut character_ids = Vec::with_capacity(CHARACTERS.len());
    for c in CHARACTERS {
        let input = CreateCharacter {
            name: c.name.to_string(),
            role: Some(c.role.to_string()),
            description: Some(c.description.to_string()),
            personality: Some(c.personality.to_string()),
            voice_profile: Some(c.voice_profile.to_string()),
            visual_notes: Some(c.visual_notes.to_string()),
            motivation_notes: Some(c.motivation_notes.to_string()),
            arc_summary: Some(c.arc_summary.to_string()),
            ..Default::default()
        };
        character_ids.push(CharacterRepo::create(pool, project.id, &input).await?.id);
    }

    let mut shot_number = 1;
    for (idx, s) in SCENES.iter().enumerate() {
        let input = CreateScene {
            scene_number: idx as i32 + 1,
            title: s.title.to_string(),
            synopsis: Some(s.synopsis.to_string()),
            world_id: world_ids.get(s.world).copied(),
            character_ids: Some(character_ids.clone()),
            emotional_zone: Some(s.emotional_zone.to_string()),
            narrative_purpose: Some(s.narrative_purpose.to_string()),
            dramatic_tension: Some(s.dramatic_tension),
            ..Default::default()
        };
        let scene = SceneRepo::create(pool, project.id, &input).await?;

        for (framing, movement, secs, description) in s.shots {
            let shot = CreateShot {
                scene_id: scene.id,
                shot_number: Some(shot_number),
                description: Some(description.to_string()),
                duration_target_sec: Some(secs),
                framing: Some(framing.to_string()),
                camera_movement: Some(movement.to_string()),
                ..Default::default()
            };
            ShotRepo::create(pool, project.id, &shot).await?;
            shot_number += 1;
        }
    }

    let outcome = SeedOutcome::Seeded {
        project_id: project.id,
        worlds: WORLDS.len(),
        characters: CHARACTERS.len(),
        scenes: SCENES.len(),
        shots: (shot_number - 1) as usize,
    };
    tracing::info!(project_id = %project.id, "Seeded example project");
    Ok(outcome)
}
