//! World configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::mechanics::Opposites;

/// Settings that shape how a world behaves at play time.
///
/// ```toml
/// agent = "you"
/// win_phrase = "you win"
/// nothing_happened = "nothing happened"
/// opposites = [["visible", "invisible"], ["locked", "unlocked"]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Reserved key of the player-controlled agent.
    pub agent: String,

    /// Entering a place whose utterance contains this phrase wins the game.
    pub win_phrase: String,

    /// Result of a rule that changed nothing.
    pub nothing_happened: String,

    pub opposites: Opposites,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            agent: "you".to_string(),
            win_phrase: "you win".to_string(),
            nothing_happened: "nothing happened".to_string(),
            opposites: Opposites::default(),
        }
    }
}

impl WorldConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
