//! Frequency-annotated prefix trie over the CTC alphabet.
//!
//! The trie answers two questions cheaply enough to be asked once per
//! candidate symbol per beam:
//!
//! * does the partial word still lead somewhere known ([`PrefixTrie::child`]),
//! * how often was this prefix seen in the corpus ([`PrefixTrie::frequency`]).
//!
//! Nodes live in an arena and are addressed by [`NodeId`], a `Copy` handle, so
//! beam states can store their trie position without borrowing the trie.
//!
//! ```
//! use ctcscore_trie::PrefixTrie;
//!
//! let trie = PrefixTrie::from_words([("hat", 3), ("ham", 2)]);
//! assert_eq!(trie.frequency(trie.root()), 5);
//! assert_eq!(trie.frequency_of("ha"), 5);
//! assert_eq!(trie.frequency_of("hat"), 3);
//! assert!(!trie.contains_prefix("hot"));
//! ```

mod stream;

use ctcscore_alphabet::{Label, LabelTranslator, TRIE_FANOUT};
use ctcscore_common::{Result, ScorerError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub use stream::MAX_NODES;

/// Handle to a node of a [`PrefixTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, present in every trie.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slot value meaning "no child". The root is never anyone's child, so id 0 is free.
const NO_CHILD: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    frequency: u64,
    children: [u32; TRIE_FANOUT],
}

impl Node {
    const fn new(frequency: u64) -> Self {
        Self { frequency, children: [NO_CHILD; TRIE_FANOUT] }
    }
}

/// Read-only prefix tree with a corpus count at every node.
///
/// Node ids depend on construction order, so compare tries through their
/// serialised form rather than by id.
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<Node>,
    translator: LabelTranslator,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    /// A trie holding only a root with frequency zero.
    pub fn new() -> Self {
        Self { nodes: vec![Node::new(0)], translator: LabelTranslator }
    }

    /// Build a trie from `(word, count)` pairs.
    ///
    /// Each node's frequency is the total count of the words passing through
    /// it, so the root holds the corpus total. Words containing characters
    /// outside the alphabet are skipped.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut trie = Self::new();
        let mut skipped = 0usize;
        for (word, count) in words {
            if !trie.insert(word, count) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "skipped words outside the trie alphabet");
        }
        trie
    }

    /// Add `count` occurrences of `word`. Returns `false` (and leaves the trie
    /// untouched) for empty words or words with unsupported characters.
    pub fn insert(&mut self, word: &str, count: u64) -> bool {
        let Some(labels) = self.translator.encode(word) else {
            return false;
        };
        let Some(slots) = labels.iter().map(|&l| self.translator.trie_slot(l)).collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        if slots.is_empty() || self.nodes.len() + slots.len() > MAX_NODES {
            return false;
        }

        let mut current = NodeId::ROOT.index();
        self.nodes[current].frequency = self.nodes[current].frequency.saturating_add(count);
        for slot in slots {
            let next = match self.nodes[current].children[slot] {
                NO_CHILD => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::new(0));
                    self.nodes[current].children[slot] = id as u32;
                    id
                }
                id => id as usize,
            };
            self.nodes[next].frequency = self.nodes[next].frequency.saturating_add(count);
            current = next;
        }
        true
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Child of `node` reached by `label`, or `None` when the prefix leaves
    /// the known vocabulary. Labels without a trie slot (separator, blank,
    /// out-of-range ids) never have children.
    #[inline]
    pub fn child(&self, node: NodeId, label: Label) -> Option<NodeId> {
        let slot = self.translator.trie_slot(label)?;
        match self.nodes.get(node.index())?.children[slot] {
            NO_CHILD => None,
            id => Some(NodeId(id)),
        }
    }

    /// Corpus count of the prefix ending at `node`.
    #[inline]
    pub fn frequency(&self, node: NodeId) -> u64 {
        self.nodes.get(node.index()).map_or(0, |n| n.frequency)
    }

    /// Node reached by walking `prefix` from the root.
    pub fn find(&self, prefix: &str) -> Option<NodeId> {
        prefix.chars().try_fold(self.root(), |node, c| {
            self.child(node, self.translator.label_from_char(c)?)
        })
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Corpus count of `prefix`, zero when unknown.
    pub fn frequency_of(&self, prefix: &str) -> u64 {
        self.find(prefix).map_or(0, |node| self.frequency(node))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the trie holds no prefixes beyond the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Load a trie from its stream file. Fails if the file cannot be opened
    /// or does not hold exactly one well-formed trie.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScorerError::io(path, e))?;
        let trie = Self::read_from(BufReader::new(file)).map_err(|e| match e {
            ScorerError::Io { source, .. } => ScorerError::io(path, source),
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            nodes = trie.len(),
            root_frequency = trie.frequency(trie.root()),
            "loaded prefix trie"
        );
        Ok(trie)
    }

    /// Parse a trie from any reader holding the stream format.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| ScorerError::io("<reader>", e))?;
        Self::parse(&text)
    }

    /// Parse the stream format from a string.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_limit(text, MAX_NODES)
    }

    /// Parse, refusing tries with more than `max_nodes` nodes.
    pub fn parse_with_limit(text: &str, max_nodes: usize) -> Result<Self> {
        let nodes = stream::parse_nodes(text, max_nodes.min(MAX_NODES))?;
        Ok(Self { nodes, translator: LabelTranslator })
    }

    /// Serialise in the stream format understood by [`PrefixTrie::read_from`].
    pub fn write_to<W: Write>(&self, writer: W) -> std::io::Result<()> {
        stream::write_nodes(&self.nodes, writer)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ScorerError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| ScorerError::io(path, e))?;
        tracing::debug!(path = %path.display(), nodes = self.len(), "saved prefix trie");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrefixTrie {
        PrefixTrie::from_words([("ht", 3), ("hat", 7), ("a", 990)])
    }

    #[test]
    fn root_frequency_is_corpus_total() {
        let trie = sample();
        assert_eq!(trie.frequency(trie.root()), 1000);
    }

    #[test]
    fn prefix_frequencies_accumulate() {
        let trie = sample();
        assert_eq!(trie.frequency_of("h"), 10);
        assert_eq!(trie.frequency_of("ht"), 3);
        assert_eq!(trie.frequency_of("ha"), 7);
        assert_eq!(trie.frequency_of("a"), 990);
        assert_eq!(trie.frequency_of("x"), 0);
    }

    #[test]
    fn child_lookup_follows_labels() {
        let trie = sample();
        let h = trie.child(trie.root(), 7).expect("h");
        let ht = trie.child(h, 19).expect("ht");
        assert_eq!(trie.frequency(ht), 3);
        assert_eq!(trie.child(ht, 0), None);
    }

    #[test]
    fn reserved_labels_have_no_children() {
        let trie = sample();
        assert_eq!(trie.child(trie.root(), 27), None);
        assert_eq!(trie.child(trie.root(), 28), None);
        assert_eq!(trie.child(trie.root(), -1), None);
        assert_eq!(trie.child(trie.root(), 1_000), None);
    }

    #[test]
    fn insert_rejects_unsupported_words() {
        let mut trie = PrefixTrie::new();
        assert!(!trie.insert("", 1));
        assert!(!trie.insert("two words", 1));
        assert!(!trie.insert("café", 1));
        assert!(trie.is_empty());
        assert_eq!(trie.frequency(trie.root()), 0);
    }

    #[test]
    fn uppercase_folds_into_lowercase_path() {
        let trie = PrefixTrie::from_words([("The", 2), ("the", 3)]);
        assert_eq!(trie.frequency_of("the"), 5);
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn unknown_node_has_zero_frequency() {
        let trie = sample();
        assert_eq!(trie.frequency(NodeId(9_999)), 0);
        assert_eq!(trie.child(NodeId(9_999), 0), None);
    }
}
