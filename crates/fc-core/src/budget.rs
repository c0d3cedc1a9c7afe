//! Token estimate used by downstream consumers to pick a delivery mode.

use crate::config::BudgetConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Small enough to pass as prompt text.
    Inline,
    /// Must go through a remote file store.
    Upload,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Inline => write!(f, "inline"),
            DeliveryMode::Upload => write!(f, "upload"),
        }
    }
}

/// Character count divided by `chars_per_token`.
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> usize {
    text.chars().count() / chars_per_token.max(1)
}

pub fn delivery_mode(text: &str, config: &BudgetConfig) -> DeliveryMode {
    if estimate_tokens(text, config.chars_per_token) > config.inline_token_threshold {
        DeliveryMode::Upload
    } else {
        DeliveryMode::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("", 4), 0);
        assert_eq!(estimate_tokens("abcdefgh", 4), 2);
        assert_eq!(estimate_tokens("abc", 4), 0);
        // characters, not bytes
        assert_eq!(estimate_tokens("éééé", 4), 1);
    }

    #[test]
    fn test_delivery_threshold_is_exclusive() {
        let config = BudgetConfig { chars_per_token: 4, inline_token_threshold: 2 };
        assert_eq!(delivery_mode("12345678", &config), DeliveryMode::Inline);
        assert_eq!(delivery_mode("123456789012", &config), DeliveryMode::Upload);
    }

    #[test]
    fn test_default_threshold() {
        let config = BudgetConfig::default();
        let small = "a".repeat(320_000);
        let large = "a".repeat(320_004);
        assert_eq!(delivery_mode(&small, &config), DeliveryMode::Inline);
        assert_eq!(delivery_mode(&large, &config), DeliveryMode::Upload);
    }
}
