//! Sentence segmentation
//!
//! A sentence ends at a run of `.`, `!` or `?` (optionally followed by closing
//! quotes or brackets) that is followed by whitespace or the end of the text.
//! A lone dot closing a known abbreviation, or any terminator inside a
//! protected span, does not end a sentence.

use std::borrow::Cow;

use crate::tables::{AbbreviationTrie, PhraseMatch};

/// Characters that end a sentence
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Closing characters kept with the terminator run
pub(crate) const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

pub(crate) fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

/// One sentence of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Text without the terminator run, trimmed
    pub body: Cow<'a, str>,
    /// Terminator run (may be empty for the last sentence)
    pub terminator: Cow<'a, str>,
    /// Byte offset of the body in the segmented text
    pub offset: usize,
    /// Whether the sentence came out of a split
    pub split: bool,
}

impl Sentence<'_> {
    /// Number of whitespace separated words in the body
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Body plus terminator, using `.` when the sentence has none
    ///
    /// A body that already ends with a terminator (a trailing abbreviation
    /// such as "etc.") gets nothing added.
    pub fn terminated(&self) -> String {
        let terminator = if !self.terminator.is_empty() {
            self.terminator.as_ref()
        } else if self.body.trim_end_matches(CLOSERS).ends_with(is_terminator) {
            ""
        } else {
            "."
        };
        format!("{}{}", self.body, terminator)
    }
}

/// Iterator over the sentences of a text
#[derive(Debug)]
pub struct Sentences<'a> {
    text: &'a str,
    pos: usize,
    abbreviations: &'a AbbreviationTrie,
    protected: &'a [PhraseMatch],
}

impl<'a> Sentences<'a> {
    /// Segment `text`; terminators inside `protected` spans never split
    pub fn new(
        text: &'a str,
        abbreviations: &'a AbbreviationTrie,
        protected: &'a [PhraseMatch],
    ) -> Self {
        Self {
            text,
            pos: 0,
            abbreviations,
            protected,
        }
    }

    fn is_protected(&self, pos: usize) -> bool {
        self.protected
            .iter()
            .any(|span| span.start <= pos && pos < span.end)
    }

    /// End of the terminator run starting at `start`, with trailing closers
    fn run_end(&self, start: usize) -> (usize, usize) {
        let rest = &self.text[start..];
        let dots = rest
            .find(|ch: char| !is_terminator(ch))
            .unwrap_or(rest.len());
        let after = &rest[dots..];
        let closers = after
            .find(|ch: char| !CLOSERS.contains(&ch))
            .unwrap_or(after.len());
        (start + dots, start + dots + closers)
    }

    fn is_boundary(&self, start: usize, dots_end: usize, end: usize) -> bool {
        let followed_by_space = self.text[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if !followed_by_space || self.is_protected(start) {
            return false;
        }

        let run = &self.text[start..dots_end];
        !(run == "." && self.abbreviations.find_abbrev(self.text, dots_end))
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Sentence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let start = self.pos + (rest.len() - rest.trim_start().len());
        if start >= self.text.len() {
            self.pos = self.text.len();
            return None;
        }

        let mut cursor = start;
        while let Some(offset) = self.text[cursor..].find(is_terminator) {
            let run_start = cursor + offset;
            let (dots_end, end) = self.run_end(run_start);

            if self.is_boundary(run_start, dots_end, end) {
                self.pos = end;
                return Some(Sentence {
                    body: Cow::Borrowed(self.text[start..run_start].trim_end()),
                    terminator: Cow::Borrowed(&self.text[run_start..end]),
                    offset: start,
                    split: false,
                });
            }
            cursor = end;
        }

        self.pos = self.text.len();
        Some(Sentence {
            body: Cow::Borrowed(self.text[start..].trim_end()),
            terminator: Cow::Borrowed(""),
            offset: start,
            split: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<(String, String)> {
        let abbreviations = AbbreviationTrie::with_builtin([]);
        Sentences::new(text, &abbreviations, &[])
            .map(|s| (s.body.into_owned(), s.terminator.into_owned()))
            .collect()
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(
            segment("Hello there. How are you? Fine!"),
            vec![
                ("Hello there".to_string(), ".".to_string()),
                ("How are you".to_string(), "?".to_string()),
                ("Fine".to_string(), "!".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_tail() {
        assert_eq!(
            segment("First one. second one"),
            vec![
                ("First one".to_string(), ".".to_string()),
                ("second one".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        let sentences = segment("Ask Dr. Smith about it. Then reply.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].0, "Ask Dr. Smith about it");
    }

    #[test]
    fn test_multi_dot_abbreviation() {
        let sentences = segment("Clients in the U.S. need a form. Others do not.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_decimal_and_url_not_split() {
        let sentences = segment("The fee is 2.5 percent. See example.com for more.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].0, "The fee is 2.5 percent");
    }

    #[test]
    fn test_terminator_run_and_closer() {
        assert_eq!(
            segment("Really?! He said \"done.\" Next"),
            vec![
                ("Really".to_string(), "?!".to_string()),
                ("He said \"done".to_string(), ".\"".to_string()),
                ("Next".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_protected_span_not_split() {
        let text = "Send the Cert. Inc. copy. Thanks.";
        let abbreviations = AbbreviationTrie::new();
        let protected = [PhraseMatch {
            start: 9,
            end: 19,
            entry: 0,
        }];
        let bodies: Vec<String> = Sentences::new(text, &abbreviations, &protected)
            .map(|s| s.body.into_owned())
            .collect();
        assert_eq!(bodies, vec!["Send the Cert. Inc. copy", "Thanks"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(segment("").is_empty());
        assert!(segment("   \n ").is_empty());
    }

    #[test]
    fn test_offsets() {
        let abbreviations = AbbreviationTrie::new();
        let text = "One.  Two three.";
        let offsets: Vec<usize> = Sentences::new(text, &abbreviations, &[])
            .map(|s| s.offset)
            .collect();
        assert_eq!(offsets, vec![0, 6]);
    }

    #[test]
    fn test_terminated() {
        let sentence = Sentence {
            body: Cow::Borrowed("No stop"),
            terminator: Cow::Borrowed(""),
            offset: 0,
            split: false,
        };
        assert_eq!(sentence.terminated(), "No stop.");
        assert_eq!(sentence.word_count(), 2);
    }

    #[test]
    fn test_terminated_after_trailing_abbreviation() {
        let sentence = Sentence {
            body: Cow::Borrowed("Bring passports etc."),
            terminator: Cow::Borrowed(""),
            offset: 0,
            split: false,
        };
        assert_eq!(sentence.terminated(), "Bring passports etc.");

        let quoted = Sentence {
            body: Cow::Borrowed("(see the U.S.)"),
            ..sentence.clone()
        };
        assert_eq!(quoted.terminated(), "(see the U.S.)");
    }
}
