//! Document-name expansion
//!
//! Rewrites document references ("certificate of incorporation") into the
//! phrasing clients expect ("a copy of your Certificate of Incorporation").
//! An occurrence that already sits inside its own expansion is skipped, so
//! running the engine on its own output never stacks expansions.

use crate::matcher::Matcher;
use crate::rules::RuleSet;
use crate::tables::PhraseMatch;

/// Applies the document-name mapping of a rule set
#[derive(Debug, Clone, Copy)]
pub struct DocumentNameExpander<'r> {
    rules: &'r RuleSet,
}

impl<'r> DocumentNameExpander<'r> {
    /// Create an expander over `rules`
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Expand recognized document names
    pub fn expand(&self, text: &str) -> String {
        let documents = self.rules.documents();
        Matcher::with_guard(self.rules.protected_phrases()).apply_with(
            text,
            documents,
            |source, found| {
                inside_own_expansion(source, found, documents.replacement(found.entry))
            },
        )
    }
}

/// Whether the replacement phrase already surrounds the matched span
fn inside_own_expansion(text: &str, found: &PhraseMatch, replacement: &str) -> bool {
    let replacement = replacement.trim();
    if replacement.is_empty() {
        return false;
    }

    let lo = found.start.saturating_sub(replacement.len());
    text.char_indices()
        .skip_while(|&(idx, _)| idx < lo)
        .take_while(|&(idx, _)| idx <= found.start)
        .any(|(start, _)| {
            caseless_prefix(&text[start..], replacement).is_some_and(|len| start + len >= found.end)
        })
}

/// Byte length of the prefix of `haystack` equal to `needle` ignoring case
fn caseless_prefix(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    let mut expected = needle.chars().flat_map(char::to_lowercase).peekable();
    let mut consumed = 0;

    while expected.peek().is_some() {
        let (idx, ch) = hay.next()?;
        for lower in ch.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
        consumed = idx + ch.len_utf8();
    }

    Some(consumed)
}
