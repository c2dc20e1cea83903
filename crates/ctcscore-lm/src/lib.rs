//! Language-model oracle contract for beam scoring.
//!
//! The scorers never look inside the n-gram model. They need a bounded
//! context ([`LanguageModel::State`]) and a full-context query that scores
//! one more word and hands back the advanced context, so a beam can be scored
//! word by word without replaying its history.
//!
//! Probabilities are log10, as produced by ARPA-style n-gram toolkits.

#[cfg(any(test, feature = "mock"))]
pub mod mock;

use ctcscore_common::Result;
use std::fmt::Debug;
use std::path::Path;

/// Vocabulary index of a word in the model.
pub type WordIndex = u32;

/// Result of scoring one word in context.
#[derive(Debug, Clone, PartialEq)]
pub struct FullScore<S> {
    /// Log10 probability of the word given the incoming state.
    pub log_prob: f32,
    /// Context after the word.
    pub state: S,
}

/// Read-only n-gram model used as a scoring oracle.
///
/// Implementations are loaded once and then shared by every beam, possibly
/// across threads, so all queries take `&self`.
pub trait LanguageModel: Send + Sync {
    /// Bounded context carried in each beam state.
    type State: Clone + Default + Debug + Send + Sync;

    /// Load the model from `path`, failing if the file cannot be opened.
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Context at the start of a sentence.
    fn begin_sentence_state(&self) -> Self::State;

    /// Score `word` after `state`.
    fn full_score(&self, state: &Self::State, word: WordIndex) -> FullScore<Self::State>;

    /// Vocabulary index of `word`, or the model's unknown-word index.
    fn index(&self, word: &str) -> WordIndex;

    /// Index of the end-of-sentence token.
    fn end_sentence(&self) -> WordIndex;

    /// Look up `word` and score it after `state`.
    fn score_word(&self, state: &Self::State, word: &str) -> FullScore<Self::State> {
        self.full_score(state, self.index(word))
    }

    /// Score the end-of-sentence token after `state`.
    fn score_end_sentence(&self, state: &Self::State) -> FullScore<Self::State> {
        self.full_score(state, self.end_sentence())
    }
}
