//! Text stream format for [`PrefixTrie`](crate::PrefixTrie).
//!
//! Nodes are written in pre-order as whitespace-separated integers. A node is
//! its frequency followed by one entry per child slot: `-1` for an empty slot,
//! or the slot index followed by the child node.
//!
//! ```text
//! 10          root frequency
//! -1          slot 0 empty
//! 1           slot 1 present
//!   4         child frequency
//!   -1 ...    27 slots of the child
//! -1 ...      remaining root slots
//! ```
//!
//! Parsing and writing both use an explicit stack, so deep tries cannot
//! overflow the call stack.

use super::{NO_CHILD, Node};
use ctcscore_alphabet::TRIE_FANOUT;
use ctcscore_common::TrieError;
use std::io::Write;
use std::iter::Enumerate;
use std::str::SplitAsciiWhitespace;

/// Largest trie representable with 32-bit node ids.
pub const MAX_NODES: usize = u32::MAX as usize;

const EMPTY_SLOT: i64 = -1;

struct Tokens<'a> {
    inner: Enumerate<SplitAsciiWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { inner: text.split_ascii_whitespace().enumerate() }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<(usize, &'a str), TrieError> {
        self.inner.next().ok_or(TrieError::UnexpectedEof { expected })
    }

    fn next_frequency(&mut self, expected: &'static str) -> Result<u64, TrieError> {
        let (position, token) = self.next_token(expected)?;
        token
            .parse()
            .map_err(|_| TrieError::InvalidToken { token: token.to_string(), position })
    }

    fn next_slot(&mut self) -> Result<i64, TrieError> {
        let (position, token) = self.next_token("child slot")?;
        token
            .parse()
            .map_err(|_| TrieError::InvalidToken { token: token.to_string(), position })
    }
}

pub(crate) fn parse_nodes(text: &str, max_nodes: usize) -> Result<Vec<Node>, TrieError> {
    let mut tokens = Tokens::new(text);
    let mut nodes = vec![Node::new(tokens.next_frequency("root frequency")?)];
    // (node index, next slot to read)
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];

    while let Some(&(node, slot)) = stack.last() {
        if slot == TRIE_FANOUT {
            stack.pop();
            continue;
        }
        let top = stack.len() - 1;
        stack[top].1 = slot + 1;

        let marker = tokens.next_slot()?;
        if marker == EMPTY_SLOT {
            continue;
        }
        if marker != slot as i64 {
            return Err(TrieError::SlotMismatch { slot, found: marker });
        }
        if nodes.len() >= max_nodes {
            return Err(TrieError::TooManyNodes { limit: max_nodes });
        }

        let child = nodes.len();
        nodes.push(Node::new(tokens.next_frequency("node frequency")?));
        nodes[node].children[slot] = child as u32;
        stack.push((child, 0));
    }

    if let Some((position, _)) = tokens.inner.next() {
        return Err(TrieError::TrailingData { position });
    }
    Ok(nodes)
}

pub(crate) fn write_nodes<W: Write>(nodes: &[Node], mut writer: W) -> std::io::Result<()> {
    let Some(root) = nodes.first() else {
        return Ok(());
    };
    writeln!(writer, "{}", root.frequency)?;

    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    while let Some(&(node, slot)) = stack.last() {
        if slot == TRIE_FANOUT {
            stack.pop();
            continue;
        }
        let top = stack.len() - 1;
        stack[top].1 = slot + 1;

        match nodes[node].children[slot] {
            NO_CHILD => writeln!(writer, "{EMPTY_SLOT}")?,
            child => {
                let child = child as usize;
                writeln!(writer, "{slot}")?;
                writeln!(writer, "{}", nodes[child].frequency)?;
                stack.push((child, 0));
            }
        }
    }
    Ok(())
}
