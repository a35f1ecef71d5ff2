//! Tone normalization
//!
//! Softens imperative or legal register through plain phrase substitution:
//! the tone mapping first, then the boilerplate fragments. No grammar is
//! rewritten; replacement phrases are taken as written in the rules.

use crate::matcher::Matcher;
use crate::rules::RuleSet;

/// Applies the tone and boilerplate mappings of a rule set
#[derive(Debug, Clone, Copy)]
pub struct ToneNormalizer<'r> {
    rules: &'r RuleSet,
}

impl<'r> ToneNormalizer<'r> {
    /// Create a normalizer over `rules`
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Rewrite tone phrases, then boilerplate fragments
    pub fn normalize(&self, text: &str) -> String {
        let matcher = Matcher::with_guard(self.rules.protected_phrases());
        let softened = matcher.apply(text, self.rules.tone());
        matcher.apply(&softened, self.rules.boilerplate())
    }
}
