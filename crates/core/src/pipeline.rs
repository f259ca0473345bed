//! Shot production pipeline.
//!
//! Every shot moves through seven ordered stages. The common path is a
//! single-step advance; direct and batch sets may jump to any stage.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Stage constants
// ---------------------------------------------------------------------------

pub const STAGE_CONCEPT: &str = "concept";
pub const STAGE_WORLD_BUILT: &str = "world_built";
pub const STAGE_BLOCKED: &str = "blocked";
pub const STAGE_GENERATED: &str = "generated";
pub const STAGE_AUDIO_LAYERED: &str = "audio_layered";
pub const STAGE_MIXED: &str = "mixed";
pub const STAGE_FINAL: &str = "final";

/// All stage strings in pipeline order.
pub const PRODUCTION_STAGES: &[&str] = &[
    STAGE_CONCEPT,
    STAGE_WORLD_BUILT,
    STAGE_BLOCKED,
    STAGE_GENERATED,
    STAGE_AUDIO_LAYERED,
    STAGE_MIXED,
    STAGE_FINAL,
];

// ---------------------------------------------------------------------------
// ProductionStage
// ---------------------------------------------------------------------------

/// A shot's position in the production pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStage {
    Concept,
    WorldBuilt,
    Blocked,
    Generated,
    AudioLayered,
    Mixed,
    Final,
}

impl ProductionStage {
    /// Every stage, in pipeline order.
    pub const ALL: [ProductionStage; 7] = [
        Self::Concept,
        Self::WorldBuilt,
        Self::Blocked,
        Self::Generated,
        Self::AudioLayered,
        Self::Mixed,
        Self::Final,
    ];

    /// Stage assigned to newly created shots.
    pub const INITIAL: ProductionStage = Self::Concept;

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => STAGE_CONCEPT,
            Self::WorldBuilt => STAGE_WORLD_BUILT,
            Self::Blocked => STAGE_BLOCKED,
            Self::Generated => STAGE_GENERATED,
            Self::AudioLayered => STAGE_AUDIO_LAYERED,
            Self::Mixed => STAGE_MIXED,
            Self::Final => STAGE_FINAL,
        }
    }

    /// Parse a stored string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STAGE_CONCEPT => Ok(Self::Concept),
            STAGE_WORLD_BUILT => Ok(Self::WorldBuilt),
            STAGE_BLOCKED => Ok(Self::Blocked),
            STAGE_GENERATED => Ok(Self::Generated),
            STAGE_AUDIO_LAYERED => Ok(Self::AudioLayered),
            STAGE_MIXED => Ok(Self::Mixed),
            STAGE_FINAL => Ok(Self::Final),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                PRODUCTION_STAGES.join(", ")
            ))),
        }
    }

    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The stage one step forward, or `None` from `final`.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for ProductionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Outcome of a single-step advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advance {
    pub from: ProductionStage,
    pub to: ProductionStage,
    /// `false` when the shot was already at the terminal stage.
    pub advanced: bool,
}

/// Move one stage forward. Advancing from `final` leaves the stage unchanged.
pub fn advance(current: ProductionStage) -> Advance {
    match current.next() {
        Some(to) => Advance {
            from: current,
            to,
            advanced: true,
        },
        None => Advance {
            from: current,
            to: current,
            advanced: false,
        },
    }
}

/// Validate a direct or batch status set.
///
/// Any stage may be set from any other stage; only the target value is
/// checked.
pub fn validate_status(status: &str) -> Result<ProductionStage, CoreError> {
    ProductionStage::from_str_value(status)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
