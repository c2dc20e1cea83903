//! Incremental beam scorers for CTC decoding.
//!
//! A CTC beam search grows many candidate transcriptions one label at a time.
//! The scorers here attach a small state to every beam and turn each
//! extension into an extra log-probability the search can add to the
//! network's score:
//!
//! * [`BaseScorer`]: plain CTC, adds nothing;
//! * [`PrefixScorer`]: penalises words that leave a vocabulary trie;
//! * [`LmScorer`]: trie-based unigram estimates mid-word, full n-gram scores
//!   at word boundaries and end of sequence.
//!
//! ## Typical use
//!
//! ```
//! use ctcscore_alphabet::{ROOT_LABEL, SPACE_LABEL};
//! use ctcscore_common::ScorerConfig;
//! use ctcscore_lm::mock::MockLanguageModel;
//! use ctcscore_scorer::{BeamScorer, LmScorer};
//! use ctcscore_trie::PrefixTrie;
//!
//! let trie = PrefixTrie::from_words([("hi", 10), ("ho", 90)]);
//! let model = MockLanguageModel::new().with_unigram("hi", -2.0);
//! let scorer = LmScorer::from_parts(model, trie, &ScorerConfig::default());
//!
//! let root = scorer.root_state();
//! let h = scorer.expand(&root, ROOT_LABEL, 7);
//! let hi = scorer.expand(&h, 7, 8);
//! let mut done = scorer.expand(&hi, 8, SPACE_LABEL);
//! assert_eq!(done.language_model_score, -2.0);
//!
//! scorer.expand_state_end(&mut done);
//! let final_delta = scorer.state_end_expansion_score(&done);
//! assert!(final_delta < 0.0);
//! ```

pub mod lm;
pub mod prefix;
pub mod scorer;

pub use lm::{LmBeamState, LmScorer};
pub use prefix::{PrefixBeamState, PrefixScorer};
pub use scorer::{BaseScorer, BeamScorer};
