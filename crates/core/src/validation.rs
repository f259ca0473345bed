//! Field-level validation shared by the create and update paths.

use crate::error::CoreError;

/// Inclusive bounds for a scene's dramatic tension.
pub const MIN_DRAMATIC_TENSION: i32 = 1;
pub const MAX_DRAMATIC_TENSION: i32 = 10;
pub const DEFAULT_DRAMATIC_TENSION: i32 = 5;

/// Default target duration for a new shot.
pub const DEFAULT_SHOT_DURATION_SECS: f64 = 5.0;

/// Maximum length of any entity name or title.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validate a required name/title: non-blank and bounded.
pub fn validate_name(field: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_dramatic_tension(tension: i32) -> Result<(), CoreError> {
    if !(MIN_DRAMATIC_TENSION..=MAX_DRAMATIC_TENSION).contains(&tension) {
        return Err(CoreError::Validation(format!(
            "dramatic_tension must be between {MIN_DRAMATIC_TENSION} and \
             {MAX_DRAMATIC_TENSION}, got {tension}"
        )));
    }
    Ok(())
}

/// Largest accepted `scene_number` / `shot_number`.
pub const MAX_ORDER_KEY: i32 = 1_000_000;

/// Validate an ordering key (`scene_number` or `shot_number`).
///
/// Order keys start at 1 and are capped at [`MAX_ORDER_KEY`], so the next
/// auto-assigned number always fits in an `i32`.
pub fn validate_order_key(field: &str, value: i32) -> Result<(), CoreError> {
    if !(1..=MAX_ORDER_KEY).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{field} must be between 1 and {MAX_ORDER_KEY}, got {value}"
        )));
    }
    Ok(())
}

/// Validate a shot's target duration. NaN, infinity and non-positive
/// values are rejected.
pub fn validate_duration(secs: f64) -> Result<(), CoreError> {
    if !secs.is_finite() {
        return Err(CoreError::Validation(
            "duration_target_sec must be a finite number".to_string(),
        ));
    }
    if secs <= 0.0 {
        return Err(CoreError::Validation(format!(
            "duration_target_sec must be > 0, got {secs}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", "").is_err());
    }

    #[test]
    fn long_name_is_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("title", &name).is_err());
        assert!(validate_name("title", &name[..MAX_NAME_LENGTH]).is_ok());
    }

    #[test]
    fn tension_bounds_are_inclusive() {
        assert!(validate_dramatic_tension(MIN_DRAMATIC_TENSION).is_ok());
        assert!(validate_dramatic_tension(MAX_DRAMATIC_TENSION).is_ok());
        assert!(validate_dramatic_tension(DEFAULT_DRAMATIC_TENSION).is_ok());
        assert!(validate_dramatic_tension(0).is_err());
        assert!(validate_dramatic_tension(11).is_err());
    }

    #[test]
    fn order_keys_start_at_one() {
        assert!(validate_order_key("shot_number", 1).is_ok());
        assert!(validate_order_key("shot_number", 0).is_err());
        assert!(validate_order_key("scene_number", -3).is_err());
    }

    #[test]
    fn order_keys_are_capped() {
        assert!(validate_order_key("shot_number", MAX_ORDER_KEY).is_ok());
        assert!(validate_order_key("shot_number", MAX_ORDER_KEY + 1).is_err());
        assert!(validate_order_key("shot_number", i32::MAX).is_err());
    }

    #[test]
    fn duration_must_be_positive_and_finite() {
        assert!(validate_duration(DEFAULT_SHOT_DURATION_SECS).is_ok());
        assert!(validate_duration(0.0).is_err());
        assert!(validate_duration(-2.5).is_err());
        assert!(validate_duration(f64::NAN).is_err());
        assert!(validate_duration(f64::INFINITY).is_err());
    }
}
