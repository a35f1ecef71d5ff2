//! The rewriting pipeline
//!
//! jargon → tone → boilerplate → document names → sentences. Each stage reads
//! the previous stage's whole output and returns a new string.

use std::path::Path;
use std::time::Instant;

use crate::documents::DocumentNameExpander;
use crate::error::ConfigError;
use crate::matcher::Matcher;
use crate::rules::RuleSet;
use crate::sentence::SentenceSimplifier;
use crate::tone::ToneNormalizer;

/// Rule-based text simplifier
///
/// Owns its [`RuleSet`] and keeps no state between calls, so one instance can
/// be shared across threads (behind `&` or `Arc`) without locking.
#[derive(Debug, Clone)]
pub struct Simplifier {
    rules: RuleSet,
}

impl Simplifier {
    /// Create a simplifier from validated rules
    pub fn new(rules: RuleSet) -> Self {
        log::debug!(
            "Simplifier ready: {} jargon, {} tone, {} boilerplate, {} document rules, max {} words",
            rules.jargon().len(),
            rules.tone().len(),
            rules.boilerplate().len(),
            rules.documents().len(),
            rules.max_sentence_length()
        );
        Self { rules }
    }

    /// Load rules from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        RuleSet::from_file(path).map(Self::new)
    }

    /// Simplifier over the embedded default rules
    pub fn builtin() -> Self {
        Self::new(RuleSet::builtin())
    }

    /// Rules in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite `text` into client-readable language
    ///
    /// Never fails; text without any matching rule comes back unchanged.
    pub fn simplify(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let start = Instant::now();
        let rules = &self.rules;

        let text = Matcher::with_guard(rules.protected_phrases()).apply(text, rules.jargon());
        let text = ToneNormalizer::new(rules).normalize(&text);
        let text = DocumentNameExpander::new(rules).expand(&text);
        let text = SentenceSimplifier::new(rules).simplify(&text);

        log::trace!("Simplified {} bytes in {:?}", text.len(), start.elapsed());
        text
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::builtin()
    }
}
