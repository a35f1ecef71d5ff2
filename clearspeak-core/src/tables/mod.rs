//! Runtime lookup tables compiled from the rule configuration

pub mod abbreviation;
pub mod phrase;

pub use abbreviation::{AbbreviationTrie, BUILTIN_ABBREVIATIONS};
pub use phrase::{PhraseMatch, PhraseTrie};

/// Word characters for boundary checks
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
