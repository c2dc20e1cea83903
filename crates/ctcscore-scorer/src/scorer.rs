//! The scorer contract between the beam search and the scoring state.

use ctcscore_alphabet::Label;
use std::fmt::Debug;

/// Scoring hooks the CTC beam search calls while it grows, finalises and
/// ranks beams.
///
/// Call order per beam: [`initialize_state`](Self::initialize_state) on the
/// root, [`expand_state`](Self::expand_state) once per explored child along
/// the beam's ancestry, then [`expand_state_end`](Self::expand_state_end)
/// once after search stops. The two score reads may be called at any time
/// and must stay cheap: the expensive work belongs in the expansion hooks.
///
/// Scorers are shared by every beam and may be called from several threads
/// at once. All mutation goes to the state passed as `&mut`.
pub trait BeamScorer: Send + Sync {
    /// Per-beam scoring state, owned by the beam and cloned into its children.
    type State: Clone + Default + Debug + Send;

    /// Reset `root` to the start-of-sequence state.
    fn initialize_state(&self, root: &mut Self::State);

    /// Derive the state of a child beam that extends `from_state` (last
    /// label `from_label`) with `to_label`. `from_state` is left untouched.
    fn expand_state(
        &self,
        _from_state: &Self::State,
        _from_label: Label,
        _to_state: &mut Self::State,
        _to_label: Label,
    ) {
    }

    /// Final scoring of a beam once decoding has finished.
    fn expand_state_end(&self, _state: &mut Self::State) {}

    /// Log-probability to rank a child with, given the network's score
    /// `previous_score` for the step.
    fn state_expansion_score(&self, _state: &Self::State, previous_score: f32) -> f32 {
        previous_score
    }

    /// Log-probability contributed by [`expand_state_end`](Self::expand_state_end).
    fn state_end_expansion_score(&self, _state: &Self::State) -> f32 {
        0.0
    }

    /// A freshly initialised root state.
    fn root_state(&self) -> Self::State {
        let mut state = Self::State::default();
        self.initialize_state(&mut state);
        state
    }

    /// Expand into a newly allocated child state.
    fn expand(&self, from_state: &Self::State, from_label: Label, to_label: Label) -> Self::State {
        let mut to_state = Self::State::default();
        self.expand_state(from_state, from_label, &mut to_state, to_label);
        to_state
    }
}

/// Plain CTC decoding: no extra state, no extra score.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseScorer;

impl BeamScorer for BaseScorer {
    type State = ();

    fn initialize_state(&self, _root: &mut ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctcscore_alphabet::ROOT_LABEL;

    #[test]
    fn base_scorer_passes_network_score_through() {
        let scorer = BaseScorer;
        let root = scorer.root_state();
        let child = scorer.expand(&root, ROOT_LABEL, 3);
        assert_eq!(scorer.state_expansion_score(&child, -2.5), -2.5);
        assert_eq!(scorer.state_end_expansion_score(&child), 0.0);
    }

    #[test]
    fn base_scorer_end_is_noop() {
        let scorer = BaseScorer;
        let mut state = scorer.root_state();
        scorer.expand_state_end(&mut state);
        assert_eq!(scorer.state_end_expansion_score(&state), 0.0);
    }
}
