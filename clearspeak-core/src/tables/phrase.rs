//! Phrase trie for longest-match-first lookup
//!
//! Every mapping category is compiled into one of these. Lookup walks the
//! text forward from a start offset and never allocates.

use std::collections::HashMap;

/// Trie node stored by index in a contiguous arena
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: lowercased char -> node index
    children: HashMap<char, u32>,
    /// Entry index when a phrase ends here
    entry: Option<u32>,
}

/// A trigger occurrence found in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Byte offset of the first matched character
    pub start: usize,
    /// Byte offset one past the last matched character
    pub end: usize,
    /// Index of the phrase in declaration order
    pub entry: u32,
}

/// Case-insensitive phrase trie
///
/// Phrases are lowercased and internal whitespace runs are folded to a single
/// space, so `"Certificate of\nIncorporation"` in the text still matches the
/// trigger `"certificate of incorporation"`.
#[derive(Debug, Clone)]
pub struct PhraseTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for PhraseTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseTrie {
    /// Create empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Build from phrases, entry indices follow iteration order
    pub fn from_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let mut trie = Self::new();
        for (idx, phrase) in phrases.into_iter().enumerate() {
            trie.insert(phrase, idx as u32);
        }
        trie
    }

    /// Number of distinct phrases stored
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no phrase has been inserted
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a phrase
    ///
    /// Returns `false` and keeps the existing entry when an equal phrase
    /// (after case and whitespace folding) was inserted before. Blank phrases
    /// are ignored.
    pub fn insert(&mut self, phrase: &str, entry: u32) -> bool {
        let mut current_idx = 0u32;
        let mut pending_space = false;
        let mut any = false;

        for ch in phrase.trim().chars() {
            if ch.is_whitespace() {
                pending_space = true;
                continue;
            }
            if pending_space {
                current_idx = self.child_or_insert(current_idx, ' ');
                pending_space = false;
            }
            for lower in ch.to_lowercase() {
                current_idx = self.child_or_insert(current_idx, lower);
            }
            any = true;
        }

        if !any {
            return false;
        }

        let node = &mut self.nodes[current_idx as usize];
        if node.entry.is_some() {
            return false;
        }
        node.entry = Some(entry);
        self.len += 1;
        true
    }

    fn child_or_insert(&mut self, parent: u32, ch: char) -> u32 {
        if let Some(&child_idx) = self.nodes[parent as usize].children.get(&ch) {
            return child_idx;
        }
        let new_idx = self.nodes.len() as u32;
        self.nodes.push(TrieNode::default());
        self.nodes[parent as usize].children.insert(ch, new_idx);
        new_idx
    }

    fn step(&self, node: u32, ch: char) -> Option<u32> {
        self.nodes[node as usize].children.get(&ch).copied()
    }

    /// Look up the phrase equal to `phrase` after case and whitespace folding
    pub fn get(&self, phrase: &str) -> Option<u32> {
        let phrase = phrase.trim();
        let found = self.longest_match(phrase, 0, |_, _| true)?;
        (found.end == phrase.len()).then_some(found.entry)
    }

    /// Longest phrase starting at byte offset `start` whose end satisfies `accept`
    ///
    /// `accept` receives the candidate end offset and entry index; rejected
    /// candidates fall back to the next shorter phrase on the same path.
    pub fn longest_match<F>(&self, text: &str, start: usize, accept: F) -> Option<PhraseMatch>
    where
        F: Fn(usize, u32) -> bool,
    {
        let rest = text.get(start..)?;
        let mut current_idx = 0u32;
        let mut in_space = false;
        let mut best = None;

        for (offset, ch) in rest.char_indices() {
            if ch.is_whitespace() {
                if offset == 0 {
                    return None;
                }
                if !in_space {
                    current_idx = match self.step(current_idx, ' ') {
                        Some(next) => next,
                        None => break,
                    };
                    in_space = true;
                }
                continue;
            }
            in_space = false;

            let mut stepped = Some(current_idx);
            for lower in ch.to_lowercase() {
                stepped = stepped.and_then(|node| self.step(node, lower));
            }
            current_idx = match stepped {
                Some(next) => next,
                None => break,
            };

            if let Some(entry) = self.nodes[current_idx as usize].entry {
                let end = start + offset + ch.len_utf8();
                if accept(end, entry) {
                    best = Some(PhraseMatch { start, end, entry });
                }
            }
        }

        best
    }
}
