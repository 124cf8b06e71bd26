use serde::{Deserialize, Serialize};

/// Match settings configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSettings {
    /// Cards dealt per player at the start of each round
    pub hand_size: usize,
    /// Preparation countdown before play begins (seconds)
    pub preparation_seconds: u64,
    /// Auto-pass deadline after a voluntary draw (seconds)
    pub auto_pass_seconds: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            hand_size: 8,
            preparation_seconds: 30,
            auto_pass_seconds: 5,
        }
    }
}

impl MatchSettings {
    /// Settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            hand_size: defaults.hand_size,
            preparation_seconds: std::env::var("PREPARATION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.preparation_seconds),
            auto_pass_seconds: std::env::var("AUTO_PASS_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auto_pass_seconds),
        }
    }
}
