//! Integration secret model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyforge_core::types::Timestamp;

/// Secret key under which the LLM API key may be stored.
pub const SECRET_LLM_API_KEY: &str = "llm_api_key";

/// A row from the `secrets` table. Never serialized directly.
#[derive(Debug, Clone, FromRow)]
pub struct Secret {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

/// The listing view of a secret with its value masked.
#[derive(Debug, Clone, Serialize)]
pub struct MaskedSecret {
    pub key: String,
    pub masked_value: String,
    pub updated_at: Timestamp,
}

impl From<Secret> for MaskedSecret {
    fn from(secret: Secret) -> Self {
        Self {
            masked_value: mask_value(&secret.value),
            key: secret.key,
            updated_at: secret.updated_at,
        }
    }
}

/// DTO for creating or replacing a secret.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSecret {
    pub key: String,
    pub value: String,
}

/// Mask all but the last four characters. Values of four characters or
/// fewer are fully masked.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let tail: String = value.chars().skip(len - 4).collect();
    format!("{}{tail}", "*".repeat(len - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_value("sk-abcdef1234"), "*********1234");
    }

    #[test]
    fn mask_hides_short_values_entirely() {
        assert_eq!(mask_value("abcd"), "****");
        assert_eq!(mask_value(""), "");
    }
}
