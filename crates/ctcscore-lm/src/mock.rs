//! Mock language model for testing.
//!
//! A bigram table with unigram fallback. Good enough to check that scorers
//! thread model state correctly and query the model only when they should.

use crate::{FullScore, LanguageModel, WordIndex};
use ctcscore_common::{ModelError, Result, ScorerError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const UNK: WordIndex = 0;
pub const BOS: WordIndex = 1;
pub const EOS: WordIndex = 2;

/// Log10 probability of a word the table does not know.
pub const DEFAULT_UNK_LOG_PROB: f32 = -6.0;

/// Context of the mock model: the previous word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MockState {
    pub previous: WordIndex,
}

#[derive(Debug)]
pub struct MockLanguageModel {
    vocab: HashMap<String, WordIndex>,
    unigrams: Vec<f32>,
    bigrams: HashMap<(WordIndex, WordIndex), f32>,
    queries: AtomicUsize,
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLanguageModel {
    /// Model knowing only `<unk>`, `<s>` and `</s>`.
    pub fn new() -> Self {
        let vocab =
            [("<unk>", UNK), ("<s>", BOS), ("</s>", EOS)].map(|(w, i)| (w.to_string(), i)).into();
        Self {
            vocab,
            unigrams: vec![DEFAULT_UNK_LOG_PROB, f32::NEG_INFINITY, -1.0],
            bigrams: HashMap::new(),
            queries: AtomicUsize::new(0),
        }
    }

    fn intern(&mut self, word: &str) -> WordIndex {
        if let Some(&index) = self.vocab.get(word) {
            return index;
        }
        let index = self.unigrams.len() as WordIndex;
        self.vocab.insert(word.to_string(), index);
        self.unigrams.push(DEFAULT_UNK_LOG_PROB);
        index
    }

    #[must_use]
    pub fn with_unigram(mut self, word: &str, log_prob: f32) -> Self {
        let index = self.intern(word);
        self.unigrams[index as usize] = log_prob;
        self
    }

    /// `log_prob` of `word` directly after `previous`.
    #[must_use]
    pub fn with_bigram(mut self, previous: &str, word: &str, log_prob: f32) -> Self {
        let previous = self.intern(previous);
        let word = self.intern(word);
        self.bigrams.insert((previous, word), log_prob);
        self
    }

    /// Number of `full_score` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        let mut model = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let log_prob: f32 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| format!("line {}: missing log probability", line_no + 1))?;
            let words: Vec<&str> = fields.collect();
            model = match words.as_slice() {
                [word] => model.with_unigram(word, log_prob),
                [previous, word] => model.with_bigram(previous, word, log_prob),
                _ => return Err(format!("line {}: expected one or two words", line_no + 1)),
            };
        }
        Ok(model)
    }
}

impl LanguageModel for MockLanguageModel {
    type State = MockState;

    /// Reads lines of `log10prob word` or `log10prob previous word`.
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ScorerError::Model(ModelError::NotFound { path: path.display().to_string() })
            }
            _ => ScorerError::io(path, e),
        })?;
        let model =
            Self::parse(&text).map_err(|reason| ModelError::LoadingFailed { reason })?;
        tracing::debug!(path = %path.display(), words = model.unigrams.len(), "loaded mock model");
        Ok(model)
    }

    fn begin_sentence_state(&self) -> MockState {
        MockState { previous: BOS }
    }

    fn full_score(&self, state: &MockState, word: WordIndex) -> FullScore<MockState> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let log_prob = self.bigrams.get(&(state.previous, word)).copied().unwrap_or_else(|| {
            self.unigrams.get(word as usize).copied().unwrap_or(DEFAULT_UNK_LOG_PROB)
        });
        FullScore { log_prob, state: MockState { previous: word } }
    }

    fn index(&self, word: &str) -> WordIndex {
        self.vocab.get(word).copied().unwrap_or(UNK)
    }

    fn end_sentence(&self) -> WordIndex {
        EOS
    }
}
