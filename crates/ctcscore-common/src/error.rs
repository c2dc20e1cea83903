//! Error types for scorer construction.
//!
//! Only construction can fail. Once a scorer exists, every expansion is
//! total: unknown words and out-of-vocabulary prefixes are scores, not errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type used across the ctcscore crates.
pub type Result<T> = std::result::Result<T, ScorerError>;

/// Top-level error returned by scorer and oracle constructors.
#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScorerError {
    /// Attach the offending path to an I/O failure.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io { path: path.as_ref().to_path_buf(), source }
    }

    /// True when the failure means a file could not be opened or read.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Config(ConfigError::Io(_)))
            || matches!(self, Self::Model(ModelError::NotFound { .. }))
    }
}

/// Malformed trie streams.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("Unexpected end of trie stream while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("Invalid token '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },
    #[error("Child slot {slot} holds label {found}")]
    SlotMismatch { slot: usize, found: i64 },
    #[error("Trailing data after root node at position {position}")]
    TrailingData { position: usize },
    #[error("Trie exceeds the node limit of {limit}")]
    TooManyNodes { limit: usize },
}

/// Language-model oracle failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model not found: {path}")]
    NotFound { path: String },
    #[error("Model loading failed: {reason}")]
    LoadingFailed { reason: String },
}

/// Configuration loading and validation failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("validation failed: {0}")]
    Validation(String),
}
