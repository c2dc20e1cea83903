//! Label translation for the CTC output alphabet.
//!
//! The acoustic network emits one of 29 labels per frame:
//!
//! | label   | meaning            |
//! |---------|--------------------|
//! | 0..=25  | `'a'..='z'`        |
//! | 26      | apostrophe         |
//! | 27      | word separator     |
//! | 28      | blank (no-op)      |
//!
//! ```
//! use ctcscore_alphabet::LabelTranslator;
//!
//! let t = LabelTranslator;
//! assert_eq!(t.character_from_label(7), Some('h'));
//! assert!(t.is_space_label(27));
//! assert!(t.is_blank_label(28));
//! ```

/// Symbol id emitted by the network.
pub type Label = i32;

/// Number of labels including the blank.
pub const ALPHABET_SIZE: usize = 29;

/// Number of labels that can occur inside a word (letters and apostrophe),
/// which is also the child fan-out of a trie node.
pub const TRIE_FANOUT: usize = 27;

pub const APOSTROPHE_LABEL: Label = 26;
pub const SPACE_LABEL: Label = 27;
pub const BLANK_LABEL: Label = 28;

/// `from_label` passed when expanding the root beam. Never equal to an
/// emitted label, so the first symbol of a sequence never collapses.
pub const ROOT_LABEL: Label = -1;

/// Maps labels to characters and identifies the two reserved labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelTranslator;

impl LabelTranslator {
    #[inline]
    pub const fn is_blank_label(&self, label: Label) -> bool {
        label == BLANK_LABEL
    }

    #[inline]
    pub const fn is_space_label(&self, label: Label) -> bool {
        label == SPACE_LABEL
    }

    /// Character for `label`; `None` for the blank and for ids outside the alphabet.
    #[inline]
    pub const fn character_from_label(&self, label: Label) -> Option<char> {
        match label {
            0..=25 => Some((b'a' + label as u8) as char),
            APOSTROPHE_LABEL => Some('\''),
            SPACE_LABEL => Some(' '),
            _ => None,
        }
    }

    /// Inverse of [`character_from_label`](Self::character_from_label).
    ///
    /// Uppercase ASCII letters fold to lowercase.
    pub const fn label_from_char(&self, c: char) -> Option<Label> {
        match c {
            'a'..='z' => Some((c as u8 - b'a') as Label),
            'A'..='Z' => Some((c as u8 - b'A') as Label),
            '\'' => Some(APOSTROPHE_LABEL),
            ' ' => Some(SPACE_LABEL),
            _ => None,
        }
    }

    /// Encode a word as labels, failing on the first character outside the alphabet.
    pub fn encode(&self, text: &str) -> Option<Vec<Label>> {
        text.chars().map(|c| self.label_from_char(c)).collect()
    }

    /// Child slot a label occupies in the trie, if it has one.
    #[inline]
    pub const fn trie_slot(&self, label: Label) -> Option<usize> {
        if label >= 0 && (label as usize) < TRIE_FANOUT { Some(label as usize) } else { None }
    }
}
