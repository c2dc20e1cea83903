//! Shared fixtures for the scorer integration tests.

#![allow(dead_code)]

use ctcscore_alphabet::{BLANK_LABEL, Label, LabelTranslator, ROOT_LABEL};
use ctcscore_lm::mock::MockLanguageModel;
use ctcscore_scorer::BeamScorer;
use ctcscore_trie::PrefixTrie;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WORDS: [(&str, u64); 3] = [("the", 600), ("cat", 300), ("car", 100)];

pub const MODEL_TABLE: &str = "\
# unigrams
-1.0 the
-2.0 cat
-2.5 car
# bigrams
-0.5 the cat
";

pub fn vocabulary_trie() -> PrefixTrie {
    PrefixTrie::from_words(WORDS)
}

pub fn mock_model() -> MockLanguageModel {
    MockLanguageModel::new()
        .with_unigram("the", -1.0)
        .with_unigram("cat", -2.0)
        .with_unigram("car", -2.5)
        .with_bigram("the", "cat", -0.5)
}

/// A model file and its companion trie written side by side.
pub struct ModelFiles {
    pub dir: TempDir,
    pub model_path: PathBuf,
}

pub fn write_model_files() -> ModelFiles {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("lm.binary");
    std::fs::write(&model_path, MODEL_TABLE).unwrap();
    vocabulary_trie().save(trie_path(&model_path)).unwrap();
    ModelFiles { dir, model_path }
}

pub fn trie_path(model_path: &Path) -> PathBuf {
    let mut path = model_path.as_os_str().to_owned();
    path.push(".trie");
    path.into()
}

pub fn labels(text: &str) -> Vec<Label> {
    LabelTranslator.encode(text).unwrap()
}

/// Labels for `text` as a CTC path: a blank separates doubled characters so
/// they are not collapsed.
pub fn ctc_path(text: &str) -> Vec<Label> {
    let mut path: Vec<Label> = Vec::new();
    for label in labels(text) {
        if path.last() == Some(&label) {
            path.push(BLANK_LABEL);
        }
        path.push(label);
    }
    path
}

/// Walk `labels` from the root the way the search extends a single beam,
/// returning every state on the path (root first).
pub fn walk<S: BeamScorer>(scorer: &S, labels: &[Label]) -> Vec<S::State> {
    let mut states = vec![scorer.root_state()];
    let mut previous = ROOT_LABEL;
    for &label in labels {
        let next = scorer.expand(states.last().unwrap(), previous, label);
        states.push(next);
        previous = label;
    }
    states
}
