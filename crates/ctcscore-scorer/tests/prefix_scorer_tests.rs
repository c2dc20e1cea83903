//! Integration tests for the prefix scorer and the base scorer.

mod common;

use common::{ctc_path, trie_path, vocabulary_trie, walk, write_model_files};
use ctcscore_common::{ConfigError, ScorerConfig, ScorerError};
use ctcscore_scorer::{BaseScorer, BeamScorer, PrefixScorer};
use proptest::prelude::*;

fn scorer() -> PrefixScorer {
    PrefixScorer::from_trie(vocabulary_trie(), &ScorerConfig::default())
}

fn sentence_penalty(scorer: &PrefixScorer, sentence: &str) -> f32 {
    let states = walk(scorer, &ctc_path(sentence));
    let mut last = states.last().unwrap().clone();
    scorer.expand_state_end(&mut last);
    scorer.state_end_expansion_score(&last)
}

// ── construction ──────────────────────────────────────────────────────────

#[test]
fn loads_trie_from_file() {
    let files = write_model_files();
    let scorer = PrefixScorer::new(trie_path(&files.model_path)).unwrap();
    assert_eq!(scorer.trie().frequency_of("c"), 400);
    assert_eq!(scorer.penalty(), 1.0);
}

#[test]
fn missing_trie_fails_fast() {
    let err = PrefixScorer::new("/nonexistent/vocab.trie").unwrap_err();
    assert!(err.is_io(), "got {err:?}");
}

#[test]
fn negative_penalty_is_rejected() {
    let config = ScorerConfig { prefix_penalty: -1.0, ..ScorerConfig::default() };
    let err = PrefixScorer::with_config("/nonexistent/vocab.trie", &config).unwrap_err();
    assert!(matches!(err, ScorerError::Config(ConfigError::Validation(_))), "got {err:?}");
}

// ── scoring ───────────────────────────────────────────────────────────────

#[test]
fn in_vocabulary_sentence_is_free() {
    assert_eq!(sentence_penalty(&scorer(), "the cat car"), 0.0);
}

#[test]
fn each_diverging_word_is_charged_once() {
    let scorer = scorer();
    assert_eq!(sentence_penalty(&scorer, "the dog"), -1.0);
    assert_eq!(sentence_penalty(&scorer, "dog ate the cat"), -2.0);
    // "cart" leaves the trie at its last letter
    assert_eq!(sentence_penalty(&scorer, "cart"), -1.0);
}

#[test]
fn unfinished_prefix_is_not_penalised() {
    assert_eq!(sentence_penalty(&scorer(), "the ca"), 0.0);
}

#[test]
fn expansion_score_ignores_network_score() {
    let scorer = scorer();
    let states = walk(&scorer, &ctc_path("dog"));
    assert_eq!(scorer.state_expansion_score(states.last().unwrap(), -42.0), -1.0);
}

#[test]
fn base_scorer_is_transparent_over_a_path() {
    let scorer = BaseScorer;
    let states = walk(&scorer, &ctc_path("the cat"));
    assert_eq!(states.len(), 8);
    assert_eq!(scorer.state_expansion_score(&states[7], -3.25), -3.25);
    assert_eq!(scorer.state_end_expansion_score(&states[7]), 0.0);
}

// ── properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn penalty_counts_unknown_words(words in prop::collection::vec(
        prop::sample::select(vec!["the", "cat", "car", "dog", "sat", "zebra", "cart"]), 1..8,
    )) {
        let scorer = scorer();
        let unknown = words.iter().filter(|w| !["the", "cat", "car"].contains(w)).count();
        let penalty = sentence_penalty(&scorer, &words.join(" "));
        prop_assert_eq!(penalty, -(unknown as f32));
    }

    #[test]
    fn penalty_is_never_positive(path in prop::collection::vec(0..=28i32, 0..50)) {
        let scorer = scorer();
        for state in walk(&scorer, &path) {
            prop_assert!(state.prob <= 0.0);
        }
    }
}
