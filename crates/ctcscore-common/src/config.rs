//! Scorer configuration file format.
//!
//! Loads [`ScorerConfig`] from a TOML file. Every field has a default, so an
//! empty file is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log10 probability used as the unigram proxy for a prefix the trie does not know.
pub const DEFAULT_OOV_LOG_FLOOR: f32 = -10.0;

/// Penalty the prefix scorer charges once per word that leaves the trie.
pub const DEFAULT_PREFIX_PENALTY: f32 = 1.0;

/// Suffix appended to a language-model path to locate its companion trie.
pub const DEFAULT_TRIE_SUFFIX: &str = ".trie";

/// Tunables shared by the prefix and language-model scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Log10 floor used mid-word once the partial word is out of vocabulary.
    pub oov_log_floor: f32,

    /// Amount subtracted from the prefix score when a word diverges from the trie.
    pub prefix_penalty: f32,

    /// Companion trie file suffix (`model.binary` -> `model.binary.trie`).
    pub trie_suffix: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            oov_log_floor: DEFAULT_OOV_LOG_FLOOR,
            prefix_penalty: DEFAULT_PREFIX_PENALTY,
            trie_suffix: DEFAULT_TRIE_SUFFIX.to_string(),
        }
    }
}

impl ScorerConfig {
    /// Generate a default configuration TOML string.
    pub fn default_toml() -> String {
        let cfg = Self::default();
        toml::to_string_pretty(&cfg).expect("default config should serialize")
    }

    /// Load configuration from a TOML file, falling back to defaults for
    /// missing fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load from TOML string (useful for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let cfg: ScorerConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration, returning an error with a descriptive
    /// message on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.oov_log_floor.is_finite() || self.oov_log_floor > 0.0 {
            return Err(ConfigError::Validation(format!(
                "oov_log_floor must be a finite log probability <= 0, got {}",
                self.oov_log_floor
            )));
        }
        if !self.prefix_penalty.is_finite() || self.prefix_penalty < 0.0 {
            return Err(ConfigError::Validation(format!(
                "prefix_penalty must be finite and >= 0, got {}",
                self.prefix_penalty
            )));
        }
        if self.trie_suffix.is_empty() {
            return Err(ConfigError::Validation("trie_suffix must not be empty".into()));
        }
        Ok(())
    }

    /// Path of the trie that accompanies the language model at `model_path`.
    pub fn trie_path_for(&self, model_path: &Path) -> std::path::PathBuf {
        let mut path = model_path.as_os_str().to_owned();
        path.push(&self.trie_suffix);
        path.into()
    }
}
