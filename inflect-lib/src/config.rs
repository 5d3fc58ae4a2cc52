// Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InflectError;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MOOD: &str = "indicative";
pub const DEFAULT_TENSE: &str = "present";

/// Settings shared by every request an [`crate::Inflector`] serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflectConfig {
    /// Minimum analyzer score a declension is built from, in [0, 1].
    pub confidence_threshold: f64,
    /// English mood key used for conjugation.
    pub mood: String,
    /// English tense key used for conjugation.
    pub tense: String,
}

impl Default for InflectConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            mood: DEFAULT_MOOD.to_string(),
            tense: DEFAULT_TENSE.to_string(),
        }
    }
}

impl InflectConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, InflectError> {
        let content = fs::read_to_string(path).map_err(|e| {
            InflectError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: InflectConfig = serde_json::from_str(&content).map_err(|e| {
            InflectError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InflectError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(InflectError::InvalidConfig(format!(
                "confidence threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.mood.trim().is_empty() {
            return Err(InflectError::InvalidConfig("mood cannot be empty".to_string()));
        }
        if self.tense.trim().is_empty() {
            return Err(InflectError::InvalidConfig("tense cannot be empty".to_string()));
        }
        Ok(())
    }
}
