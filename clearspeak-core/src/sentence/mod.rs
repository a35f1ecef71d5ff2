//! Sentence-level simplification
//!
//! Long sentences are split at the coordinating conjunction or semicolon
//! nearest to their word midpoint. Pieces that are still too long are split
//! again, so the output is a fixed point: running it through the splitter a
//! second time changes nothing.

pub mod segmenter;

use std::borrow::Cow;
use std::collections::VecDeque;

use crate::matcher::{capitalize_first, find_occurrences};
use crate::rules::RuleSet;
use crate::tables::PhraseMatch;

pub use segmenter::{Sentence, Sentences, TERMINATORS};

use segmenter::{is_terminator, CLOSERS};

/// Punctuation dropped from the end of the first half of a split
const TRAILING_PUNCTUATION: [char; 3] = [',', ';', ':'];

/// Splits and reflows sentences longer than the rule set's threshold
#[derive(Debug, Clone, Copy)]
pub struct SentenceSimplifier<'r> {
    rules: &'r RuleSet,
}

impl<'r> SentenceSimplifier<'r> {
    /// Create a simplifier over `rules`
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Spans of `text` that must not be split: every replacement phrase
    pub fn protected_spans(&self, text: &str) -> Vec<PhraseMatch> {
        find_occurrences(self.rules.protected_phrases(), text)
    }

    /// Lazily simplified sentences of `text`
    ///
    /// The iterator makes a single pass over the text and cannot be
    /// restarted.
    pub fn simplified<'a>(
        &'a self,
        text: &'a str,
        protected: &'a [PhraseMatch],
    ) -> Simplified<'a> {
        Simplified {
            sentences: Sentences::new(text, self.rules.abbreviations(), protected),
            pending: VecDeque::new(),
            text,
            protected,
            rules: self.rules,
        }
    }

    /// Split every oversized sentence of `text`
    ///
    /// Returns the input unchanged when no sentence needed splitting.
    /// Otherwise sentences are joined with single spaces and each one ends
    /// with a terminator.
    pub fn simplify(&self, text: &str) -> String {
        let protected = self.protected_spans(text);
        let sentences: Vec<Sentence<'_>> = self.simplified(text, &protected).collect();

        if !sentences.iter().any(|s| s.split) {
            return text.to_string();
        }

        log::trace!("Reflowed text into {} sentences", sentences.len());
        sentences
            .iter()
            .map(Sentence::terminated)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Iterator of simplified sentences, see [`SentenceSimplifier::simplified`]
#[derive(Debug)]
pub struct Simplified<'a> {
    sentences: Sentences<'a>,
    pending: VecDeque<Sentence<'a>>,
    text: &'a str,
    protected: &'a [PhraseMatch],
    rules: &'a RuleSet,
}

/// Byte range of one whitespace separated word
#[derive(Debug, Clone, Copy)]
struct Word {
    start: usize,
    end: usize,
}

impl<'a> Simplified<'a> {
    fn words(&self, start: usize, end: usize) -> Vec<Word> {
        let slice = &self.text[start..end];
        let mut words = Vec::new();
        let mut word_start = None;

        for (idx, ch) in slice.char_indices() {
            match (ch.is_whitespace(), word_start) {
                (true, Some(ws)) => {
                    words.push(Word {
                        start: start + ws,
                        end: start + idx,
                    });
                    word_start = None;
                }
                (false, None) => word_start = Some(idx),
                _ => {}
            }
        }
        if let Some(ws) = word_start {
            words.push(Word {
                start: start + ws,
                end,
            });
        }

        words
    }

    /// Best split: index of the first word of the second half
    fn split_point(&self, words: &[Word]) -> Option<usize> {
        let count = words.len();
        (1..count)
            .filter(|&idx| self.can_split_before(words, idx))
            .min_by_key(|&idx| (2 * idx).abs_diff(count))
    }

    fn can_split_before(&self, words: &[Word], idx: usize) -> bool {
        let before = &self.text[words[idx - 1].start..words[idx - 1].end];
        let next = self.text[words[idx].start..words[idx].end].to_lowercase();

        let at_semicolon = before.ends_with(';');
        let at_conjunction = self.rules.conjunctions().iter().any(|c| *c == next);
        if !at_semicolon && !at_conjunction {
            return false;
        }

        let gap_start = words[idx - 1].end;
        let gap_end = words[idx].start;
        if self
            .protected
            .iter()
            .any(|span| span.start < gap_start && gap_end < span.end)
        {
            return false;
        }

        // The dot added after the first half has to end a sentence on a rerun
        let last = before.trim_end_matches(TRAILING_PUNCTUATION);
        let dotted = format!("{last}.");
        !last.is_empty()
            && !last.trim_end_matches(CLOSERS).ends_with(is_terminator)
            && !self.rules.abbreviations().find_abbrev(&dotted, dotted.len())
    }

    /// Split `[start, end)` until every piece fits or has no split point
    fn split_range(&self, start: usize, end: usize, out: &mut Vec<(usize, usize)>) {
        let words = self.words(start, end);
        if words.len() <= self.rules.max_sentence_length() {
            out.push((start, end));
            return;
        }

        match self.split_point(&words) {
            Some(idx) => {
                let left_end = start
                    + self.text[start..words[idx - 1].end]
                        .trim_end_matches(TRAILING_PUNCTUATION)
                        .len();
                self.split_range(start, left_end, out);
                self.split_range(words[idx].start, end, out);
            }
            None => out.push((start, end)),
        }
    }

    fn simplify_sentence(&mut self, sentence: Sentence<'a>) -> Sentence<'a> {
        if sentence.word_count() <= self.rules.max_sentence_length() {
            return sentence;
        }

        let start = sentence.offset;
        let end = start + sentence.body.len();
        let mut pieces = Vec::new();
        self.split_range(start, end, &mut pieces);

        if pieces.len() < 2 {
            return sentence;
        }

        log::debug!(
            "Split {}-word sentence at byte {} into {} pieces",
            sentence.word_count(),
            start,
            pieces.len()
        );

        let text = self.text;
        let last = pieces.len() - 1;
        for (idx, &(piece_start, piece_end)) in pieces.iter().enumerate() {
            let body = &text[piece_start..piece_end];
            self.pending.push_back(Sentence {
                body: if idx == 0 {
                    Cow::Borrowed(body)
                } else {
                    Cow::Owned(capitalize_first(body))
                },
                terminator: if idx == last {
                    sentence.terminator.clone()
                } else {
                    Cow::Borrowed(".")
                },
                offset: piece_start,
                split: true,
            });
        }

        self.pending.pop_front().unwrap_or(sentence)
    }
}

impl<'a> Iterator for Simplified<'a> {
    type Item = Sentence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(sentence) = self.pending.pop_front() {
            return Some(sentence);
        }
        let sentence = self.sentences.next()?;
        Some(self.simplify_sentence(sentence))
    }
}
