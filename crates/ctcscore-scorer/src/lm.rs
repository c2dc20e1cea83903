//! Language-model scorer.
//!
//! Mid-word, a beam is scored with a unigram estimate read off the prefix
//! trie: `log10(freq(prefix) / freq(root))`, or a fixed floor once the prefix
//! is out of vocabulary. At a word separator the completed word is scored by
//! the n-gram model and the estimate is replaced by the real score. At end of
//! sequence any partial word is flushed the same way and the end-of-sentence
//! token is scored.
//!
//! The search ranks children by `delta_score`, the change caused by the last
//! step, and accumulates the path total itself.

use crate::scorer::BeamScorer;
use ctcscore_alphabet::{Label, LabelTranslator};
use ctcscore_common::{Result, ScorerConfig};
use ctcscore_lm::LanguageModel;
use ctcscore_trie::{NodeId, PrefixTrie};
use std::path::Path;

/// Per-beam state of the [`LmScorer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LmBeamState<S> {
    /// Language-model score of the completed words plus the unigram estimate
    /// of the word in progress.
    pub score: f32,
    /// Sum of the language-model scores of all completed words.
    pub language_model_score: f32,
    /// `score` after the last transition minus `score` before it.
    pub delta_score: f32,
    /// Characters since the last separator.
    pub incomplete_word: String,
    /// Trie position of `incomplete_word`; `None` once it is out of vocabulary.
    pub incomplete_word_trie_node: Option<NodeId>,
    /// Model context after the last completed word.
    pub model_state: S,
}

/// Scores beams with a prefix trie mid-word and an n-gram model at word
/// boundaries.
#[derive(Debug)]
pub struct LmScorer<L> {
    model: L,
    trie: PrefixTrie,
    translator: LabelTranslator,
    oov_log_floor: f32,
    root_frequency: f64,
}

impl<L: LanguageModel> LmScorer<L> {
    /// Load the model at `lm_path` and its trie at `lm_path` + `.trie`.
    pub fn new(lm_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(lm_path, &ScorerConfig::default())
    }

    pub fn with_config(lm_path: impl AsRef<Path>, config: &ScorerConfig) -> Result<Self> {
        config.validate()?;
        let lm_path = lm_path.as_ref();
        let model = L::load(lm_path)?;
        let trie = PrefixTrie::load(config.trie_path_for(lm_path))?;
        tracing::info!(path = %lm_path.display(), "loaded language model scorer");
        Ok(Self::from_parts(model, trie, config))
    }

    /// Build from an already loaded model and trie.
    pub fn from_parts(model: L, trie: PrefixTrie, config: &ScorerConfig) -> Self {
        let root_frequency = trie.frequency(trie.root()) as f64;
        tracing::debug!(
            nodes = trie.len(),
            root_frequency,
            oov_log_floor = config.oov_log_floor,
            "constructed language model scorer"
        );
        Self {
            model,
            trie,
            translator: LabelTranslator,
            oov_log_floor: config.oov_log_floor,
            root_frequency,
        }
    }

    pub fn model(&self) -> &L {
        &self.model
    }

    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    pub fn oov_log_floor(&self) -> f32 {
        self.oov_log_floor
    }

    /// Unigram estimate for the prefix at `node`, or the floor for prefixes
    /// with no usable count.
    fn prefix_log_prob(&self, node: Option<NodeId>) -> f32 {
        let Some(node) = node else {
            return self.oov_log_floor;
        };
        let estimate = (self.trie.frequency(node) as f64 / self.root_frequency).log10() as f32;
        if estimate.is_finite() { estimate } else { self.oov_log_floor }
    }

    /// Score the word in progress with the model and start a new word.
    fn complete_word(&self, state: &mut LmBeamState<L::State>) {
        let previous_score = state.score;
        if !state.incomplete_word.is_empty() {
            let scored = self.model.score_word(&state.model_state, &state.incomplete_word);
            tracing::trace!(
                word = %state.incomplete_word,
                log_prob = scored.log_prob,
                "scored completed word"
            );
            state.model_state = scored.state;
            state.language_model_score += scored.log_prob;
        }
        state.score = state.language_model_score;
        state.delta_score = state.score - previous_score;
        self.reset_word(state);
    }

    fn reset_word(&self, state: &mut LmBeamState<L::State>) {
        state.incomplete_word.clear();
        state.incomplete_word_trie_node = Some(self.trie.root());
    }
}

impl<L: LanguageModel> BeamScorer for LmScorer<L> {
    type State = LmBeamState<L::State>;

    fn initialize_state(&self, root: &mut Self::State) {
        root.language_model_score = 0.0;
        root.score = 0.0;
        root.delta_score = 0.0;
        self.reset_word(root);
        root.model_state = self.model.begin_sentence_state();
    }

    fn expand_state(
        &self,
        from_state: &Self::State,
        from_label: Label,
        to_state: &mut Self::State,
        to_label: Label,
    ) {
        to_state.clone_from(from_state);

        if from_label == to_label || self.translator.is_blank_label(to_label) {
            to_state.delta_score = 0.0;
            return;
        }

        if self.translator.is_space_label(to_label) {
            self.complete_word(to_state);
            return;
        }

        if let Some(c) = self.translator.character_from_label(to_label) {
            to_state.incomplete_word.push(c);
        }
        let node = from_state.incomplete_word_trie_node.and_then(|n| self.trie.child(n, to_label));
        to_state.incomplete_word_trie_node = node;
        to_state.score = self.prefix_log_prob(node) + to_state.language_model_score;
        to_state.delta_score = to_state.score - from_state.score;
    }

    fn expand_state_end(&self, state: &mut Self::State) {
        let score_before = state.score;
        if !state.incomplete_word.is_empty() {
            self.complete_word(state);
        }
        let end = self.model.score_end_sentence(&state.model_state);
        state.model_state = end.state;
        state.language_model_score += end.log_prob;
        state.score = state.language_model_score;
        state.delta_score = state.score - score_before;
        tracing::trace!(
            language_model_score = state.language_model_score,
            delta_score = state.delta_score,
            "finalised beam"
        );
    }

    fn state_expansion_score(&self, state: &Self::State, previous_score: f32) -> f32 {
        state.delta_score + previous_score
    }

    fn state_end_expansion_score(&self, state: &Self::State) -> f32 {
        state.delta_score
    }
}
