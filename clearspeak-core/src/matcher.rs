//! Longest-match-first phrase substitution
//!
//! The text is scanned once from left to right. At every position where a
//! trigger may start on a word boundary the mapping's trie is walked and the
//! longest trigger that also ends on a word boundary is replaced. Scanning
//! resumes after the replaced span, so matches never overlap and a
//! replacement is never rescanned by the same mapping.

use crate::rules::Mapping;
use crate::tables::{is_word_char, PhraseMatch, PhraseTrie};

/// Phrase substitution engine for one mapping at a time
///
/// With a guard, matches overlapping any occurrence of a guarded phrase are
/// left alone. The engine guards with every replacement phrase of the rule
/// set, which keeps already rewritten text from being rewritten again.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher<'r> {
    guard: Option<&'r PhraseTrie>,
}

impl<'r> Matcher<'r> {
    /// Matcher without a guard
    pub fn new() -> Self {
        Self { guard: None }
    }

    /// Matcher that never rewrites inside an occurrence of a `protected` phrase
    pub fn with_guard(protected: &'r PhraseTrie) -> Self {
        Self {
            guard: Some(protected),
        }
    }

    /// Replace every trigger of `mapping` found in `text`
    pub fn apply(&self, text: &str, mapping: &Mapping) -> String {
        self.apply_with(text, mapping, |_, _| false)
    }

    /// Like [`apply`](Self::apply), but also leaves a match alone when
    /// `skip(text, match)` returns true
    pub fn apply_with<F>(&self, text: &str, mapping: &Mapping, skip: F) -> String
    where
        F: Fn(&str, &PhraseMatch) -> bool,
    {
        if mapping.is_empty() || text.is_empty() {
            return text.to_string();
        }

        let protected = match self.guard {
            Some(guard) => find_occurrences(guard, text),
            None => Vec::new(),
        };

        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut replaced = 0usize;

        for found in self.find_matches(text, mapping) {
            if overlaps_any(&protected, &found) || skip(text, &found) {
                continue;
            }
            out.push_str(&text[copied..found.start]);
            push_replacement(
                &mut out,
                &text[found.start..found.end],
                mapping.replacement(found.entry),
            );
            copied = found.end;
            replaced += 1;
        }

        if replaced > 0 {
            log::trace!("[{}] {} replacements", mapping.category(), replaced);
        }

        out.push_str(&text[copied..]);
        out
    }

    /// Leftmost, longest, non-overlapping trigger occurrences
    pub fn find_matches(&self, text: &str, mapping: &Mapping) -> Vec<PhraseMatch> {
        let trie = mapping.triggers();
        let mut matches = Vec::new();
        let mut prev: Option<char> = None;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            if starts_on_boundary(prev, ch) {
                if let Some(found) = trie.longest_match(text, pos, |end, _| ends_on_boundary(text, end))
                {
                    matches.push(found);
                    pos = found.end;
                    prev = text[..pos].chars().next_back();
                    continue;
                }
            }
            prev = Some(ch);
            pos += ch.len_utf8();
        }

        matches
    }
}

/// Every position-wise longest occurrence of a phrase in `trie`, overlaps included
pub(crate) fn find_occurrences(trie: &PhraseTrie, text: &str) -> Vec<PhraseMatch> {
    if trie.is_empty() {
        return Vec::new();
    }

    let mut prev: Option<char> = None;
    text.char_indices()
        .filter_map(|(pos, ch)| {
            let at_boundary = starts_on_boundary(prev, ch);
            prev = Some(ch);
            if !at_boundary {
                return None;
            }
            trie.longest_match(text, pos, |end, _| ends_on_boundary(text, end))
        })
        .collect()
}

/// Whether `found` overlaps any span in `spans`
pub(crate) fn overlaps_any(spans: &[PhraseMatch], found: &PhraseMatch) -> bool {
    spans
        .iter()
        .any(|span| span.start < found.end && found.start < span.end)
}

fn starts_on_boundary(prev: Option<char>, first: char) -> bool {
    !is_word_char(first) || !prev.is_some_and(is_word_char)
}

fn ends_on_boundary(text: &str, end: usize) -> bool {
    let last = text[..end].chars().next_back();
    let next = text[end..].chars().next();
    !last.is_some_and(is_word_char) || !next.is_some_and(is_word_char)
}

fn push_replacement(out: &mut String, matched: &str, replacement: &str) {
    if matched.chars().next().is_some_and(char::is_uppercase) {
        out.push_str(&capitalize_first(replacement));
    } else {
        out.push_str(replacement);
    }
}

/// Uppercase the first alphabetic character
pub(crate) fn capitalize_first(text: &str) -> String {
    match text.char_indices().find(|(_, ch)| ch.is_alphabetic()) {
        Some((idx, ch)) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..idx]);
            out.extend(ch.to_uppercase());
            out.push_str(&text[idx + ch.len_utf8()..]);
            out
        }
        None => text.to_string(),
    }
}
