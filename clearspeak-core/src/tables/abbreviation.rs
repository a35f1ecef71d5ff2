//! Abbreviation trie for backward scanning from a dot
//!
//! Used by the sentence splitter so that "Dr." or "U.S." does not end a
//! sentence.

use std::collections::HashMap;

/// Abbreviations recognized without any configuration
pub const BUILTIN_ABBREVIATIONS: &[&str] = &[
    // Titles
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St",
    // Business
    "Inc", "Ltd", "Co", "Corp", "LLC", "PLC", "Dept", "Ref", "No",
    // Common
    "etc", "e.g", "i.e", "vs", "approx", "incl", "Ave",
    // Months
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
    // Places
    "U.S", "U.K", "U.S.A", "E.U",
];

/// Compact trie node using array indices instead of pointers
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Whether this node marks end of abbreviation
    is_end: bool,
}

/// Case-insensitive abbreviation trie
#[derive(Debug, Clone)]
pub struct AbbreviationTrie {
    /// All nodes in contiguous storage
    nodes: Vec<TrieNode>,
}

impl Default for AbbreviationTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl AbbreviationTrie {
    /// Create empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Built-in abbreviations plus `extra`
    pub fn with_builtin<'a>(extra: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_list(BUILTIN_ABBREVIATIONS.iter().copied().chain(extra))
    }

    /// Build from a list of abbreviations written without the final dot
    pub fn from_list<'a>(abbreviations: impl IntoIterator<Item = &'a str>) -> Self {
        let mut trie = Self::new();

        for abbr in abbreviations {
            let abbr = abbr.trim().trim_end_matches('.');
            trie.insert(abbr);

            // "U.S.A" also needs "U" and "U.S" so intermediate dots don't split
            if abbr.contains('.') {
                let parts: Vec<&str> = abbr.split('.').collect();
                for i in 1..parts.len() {
                    let prefix = parts[..i].join(".");
                    if !prefix.is_empty() {
                        trie.insert(&prefix);
                    }
                }
            }
        }

        trie
    }

    /// Insert abbreviation into trie
    pub fn insert(&mut self, abbreviation: &str) {
        if abbreviation.is_empty() {
            return;
        }

        let mut current_idx = 0u32;

        for ch in abbreviation.to_lowercase().chars() {
            current_idx = match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&child_idx) => child_idx,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current_idx as usize]
                        .children
                        .insert(ch, new_idx);
                    new_idx
                }
            };
        }

        self.nodes[current_idx as usize].is_end = true;
    }

    /// Whether the dot ending at byte `pos` (i.e. `text[..pos]` ends with
    /// `.`) closes an abbreviation
    pub fn find_abbrev(&self, text: &str, pos: usize) -> bool {
        let Some(before) = text.get(..pos) else {
            return false;
        };
        let Some(word_part) = before.strip_suffix('.') else {
            return false;
        };

        // Scan back to the start of the token; dots stay inside it
        let word_start = word_part
            .char_indices()
            .rev()
            .find(|&(_, ch)| is_token_delimiter(ch))
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(0);

        self.is_abbreviation(&word_part[word_start..])
    }

    /// Whether `word` (without trailing dot) is a known abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut current_idx = 0u32;
        for ch in word.chars().flat_map(char::to_lowercase) {
            match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&next_idx) => current_idx = next_idx,
                None => return false,
            }
        }

        self.nodes[current_idx as usize].is_end
    }
}

fn is_token_delimiter(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(
            ch,
            ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '!' | '?'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_abbreviations() {
        let trie = AbbreviationTrie::from_list(["Dr", "Mr", "U.S"]);

        // pos is after the dot
        assert!(trie.find_abbrev("Dr.", 3));
        assert!(trie.find_abbrev("Mr.", 3));
        assert!(trie.find_abbrev("Hello Dr.", 9));
        assert!(!trie.find_abbrev("Ms.", 3));
        assert!(!trie.find_abbrev("Dr", 2));
    }

    #[test]
    fn test_multi_period_abbreviations() {
        let trie = AbbreviationTrie::from_list(["U.S.A"]);

        assert!(trie.find_abbrev("U.", 2), "Should detect 'U' at first dot");
        assert!(trie.find_abbrev("U.S.", 4), "Should detect 'U.S' at second dot");
        assert!(trie.find_abbrev("U.S.A.", 6), "Should detect 'U.S.A' at third dot");
        assert!(trie.find_abbrev("based in the U.S.A.", 19));
    }

    #[test]
    fn test_case_insensitive() {
        let trie = AbbreviationTrie::from_list(["Dr"]);

        assert!(trie.find_abbrev("dr.", 3));
        assert!(trie.find_abbrev("DR.", 3));
        assert!(trie.find_abbrev("Dr.", 3));
    }

    #[test]
    fn test_trailing_dot_in_config_is_ignored() {
        let trie = AbbreviationTrie::from_list(["Cert."]);
        assert!(trie.is_abbreviation("cert"));
    }

    #[test]
    fn test_builtin_and_extra() {
        let trie = AbbreviationTrie::with_builtin(["Reg"]);
        assert!(trie.is_abbreviation("etc"));
        assert!(trie.is_abbreviation("e.g"));
        assert!(trie.is_abbreviation("reg"));
        assert!(!trie.is_abbreviation("documents"));
    }

    #[test]
    fn test_delimiter_before_word() {
        let trie = AbbreviationTrie::with_builtin([]);
        assert!(trie.find_abbrev("(see Ref.", 9));
        assert!(!trie.find_abbrev("the end.", 8));
    }
}
