//! Controlled vocabularies for worlds, scenes and shots.
//!
//! Values are stored as plain strings; these lists are the accepted set and
//! are served verbatim by the enums endpoint.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const EMOTIONAL_ZONES: &[&str] = &[
    "intimate",
    "contemplative",
    "tense",
    "revelatory",
    "chaotic",
    "transcendent",
    "desolate",
    "triumphant",
    "liminal",
];

pub const FRAMINGS: &[&str] = &[
    "extreme_wide",
    "wide",
    "medium_wide",
    "medium",
    "medium_close",
    "close",
    "extreme_close",
];

pub const CAMERA_MOVEMENTS: &[&str] = &[
    "static",
    "pan_left",
    "pan_right",
    "tilt_up",
    "tilt_down",
    "dolly_in",
    "dolly_out",
    "crane_up",
    "crane_down",
    "orbit",
    "handheld",
    "tracking",
];

pub const TRANSITIONS: &[&str] = &[
    "cut",
    "dissolve",
    "match_cut",
    "smash_cut",
    "fade_to_black",
    "fade_from_black",
    "wipe",
    "continuous",
];

pub const DEFAULT_EMOTIONAL_ZONE: &str = "contemplative";
pub const DEFAULT_FRAMING: &str = "medium";
pub const DEFAULT_CAMERA_MOVEMENT: &str = "static";
pub const DEFAULT_TRANSITION: &str = "cut";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_emotional_zone(zone: &str) -> Result<(), CoreError> {
    validate_one_of("emotional_zone", zone, EMOTIONAL_ZONES)
}

pub fn validate_framing(framing: &str) -> Result<(), CoreError> {
    validate_one_of("framing", framing, FRAMINGS)
}

pub fn validate_camera_movement(movement: &str) -> Result<(), CoreError> {
    validate_one_of("camera_movement", movement, CAMERA_MOVEMENTS)
}

/// Validate a transition. `field` is `transition_in` or `transition_out`.
pub fn validate_transition(field: &str, transition: &str) -> Result<(), CoreError> {
    validate_one_of(field, transition, TRANSITIONS)
}

/// Validate an optional value, skipping `None`.
///
/// Update DTOs carry every field as `Option`; this keeps call sites short.
pub fn validate_opt(
    value: Option<&str>,
    check: impl Fn(&str) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}
