//! Trie-only scorer.
//!
//! Penalises beams whose current word has left the known vocabulary. The
//! penalty is charged once, at the first symbol that diverges from the trie;
//! the word then stays out of vocabulary until the next separator.

use crate::scorer::BeamScorer;
use ctcscore_alphabet::{Label, LabelTranslator};
use ctcscore_common::{Result, ScorerConfig};
use ctcscore_trie::{NodeId, PrefixTrie};
use std::path::Path;

/// Per-beam state of the [`PrefixScorer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefixBeamState {
    /// Accumulated penalty, never positive.
    pub prob: f32,
    /// Trie position of the current word; `None` once it is out of vocabulary.
    pub node: Option<NodeId>,
}

/// Scores beams by whether their words stay inside a prefix trie.
#[derive(Debug)]
pub struct PrefixScorer {
    trie: PrefixTrie,
    translator: LabelTranslator,
    penalty: f32,
}

impl PrefixScorer {
    /// Load the trie at `trie_path` with the default penalty.
    pub fn new(trie_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(trie_path, &ScorerConfig::default())
    }

    pub fn with_config(trie_path: impl AsRef<Path>, config: &ScorerConfig) -> Result<Self> {
        config.validate()?;
        let trie = PrefixTrie::load(trie_path)?;
        Ok(Self::from_trie(trie, config))
    }

    /// Build from an already loaded trie.
    pub fn from_trie(trie: PrefixTrie, config: &ScorerConfig) -> Self {
        tracing::debug!(
            nodes = trie.len(),
            penalty = config.prefix_penalty,
            "constructed prefix scorer"
        );
        Self { trie, translator: LabelTranslator, penalty: config.prefix_penalty }
    }

    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    pub fn penalty(&self) -> f32 {
        self.penalty
    }
}

impl BeamScorer for PrefixScorer {
    type State = PrefixBeamState;

    fn initialize_state(&self, root: &mut PrefixBeamState) {
        root.prob = 0.0;
        root.node = Some(self.trie.root());
    }

    fn expand_state(
        &self,
        from_state: &PrefixBeamState,
        from_label: Label,
        to_state: &mut PrefixBeamState,
        to_label: Label,
    ) {
        to_state.clone_from(from_state);

        if from_label == to_label || self.translator.is_blank_label(to_label) {
            return;
        }
        if self.translator.is_space_label(to_label) {
            to_state.node = Some(self.trie.root());
            return;
        }
        // Already out of vocabulary: the penalty for this word was charged.
        let Some(node) = to_state.node else {
            return;
        };

        to_state.node = self.trie.child(node, to_label);
        if to_state.node.is_none() {
            to_state.prob -= self.penalty;
        }
    }

    fn state_expansion_score(&self, state: &PrefixBeamState, _previous_score: f32) -> f32 {
        state.prob
    }

    fn state_end_expansion_score(&self, state: &PrefixBeamState) -> f32 {
        state.prob
    }
}
