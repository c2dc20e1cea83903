//! Common types for the ctcscore beam scorers
//!
//! This crate provides the error taxonomy and configuration shared by the
//! trie, language-model and scorer crates.

pub mod config;
pub mod error;

pub use config::{
    DEFAULT_OOV_LOG_FLOOR, DEFAULT_PREFIX_PENALTY, DEFAULT_TRIE_SUFFIX, ScorerConfig,
};
pub use error::*;
