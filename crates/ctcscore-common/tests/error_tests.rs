//! Error display and conversion tests for ctcscore-common

use ctcscore_common::*;
use proptest::prelude::*;
use std::io;

#[test]
fn test_scorer_error_variants() {
    let trie_error = ScorerError::Trie(TrieError::UnexpectedEof { expected: "frequency" });
    assert!(matches!(trie_error, ScorerError::Trie(_)));
    assert_eq!(
        format!("{}", trie_error),
        "Trie error: Unexpected end of trie stream while reading frequency"
    );

    let model_error = ScorerError::Model(ModelError::NotFound { path: "/test/lm.bin".to_string() });
    assert!(matches!(model_error, ScorerError::Model(_)));
    assert!(format!("{}", model_error).contains("/test/lm.bin"));

    let config_error = ScorerError::Config(ConfigError::Validation("bad".to_string()));
    assert_eq!(format!("{}", config_error), "Configuration error: validation failed: bad");
}

#[test]
fn test_trie_error_variants() {
    let invalid = TrieError::InvalidToken { token: "x7".to_string(), position: 3 };
    assert_eq!(format!("{}", invalid), "Invalid token 'x7' at position 3");

    let mismatch = TrieError::SlotMismatch { slot: 4, found: 9 };
    assert_eq!(format!("{}", mismatch), "Child slot 4 holds label 9");

    let trailing = TrieError::TrailingData { position: 30 };
    assert_eq!(format!("{}", trailing), "Trailing data after root node at position 30");
}

#[test]
fn test_model_error_variants() {
    let not_found = ModelError::NotFound { path: "/nonexistent/lm.binary".to_string() };
    assert_eq!(format!("{}", not_found), "Model not found: /nonexistent/lm.binary");

    let failed = ModelError::LoadingFailed { reason: "corrupted header".to_string() };
    assert_eq!(format!("{}", failed), "Model loading failed: corrupted header");
}

#[test]
fn test_from_conversions() {
    let err: ScorerError = TrieError::TooManyNodes { limit: 10 }.into();
    assert!(matches!(err, ScorerError::Trie(TrieError::TooManyNodes { limit: 10 })));

    let err: ScorerError = ModelError::LoadingFailed { reason: "x".into() }.into();
    assert!(matches!(err, ScorerError::Model(_)));

    let err: ScorerError = ConfigError::from(io::Error::other("disk")).into();
    assert!(err.is_io());
}

#[test]
fn test_io_error_source_is_preserved() {
    use std::error::Error as _;

    let err = ScorerError::io("/tmp/lm.trie", io::Error::new(io::ErrorKind::NotFound, "gone"));
    let source = err.source().expect("io error keeps its source");
    assert_eq!(source.to_string(), "gone");
}

proptest! {
    #[test]
    fn invalid_token_display_contains_token(token in "[a-z0-9]{1,12}", position in 0usize..10_000) {
        let err = ScorerError::from(TrieError::InvalidToken { token: token.clone(), position });
        let text = err.to_string();
        prop_assert!(text.contains(&token));
        prop_assert!(text.contains(&position.to_string()));
    }
}
