//! Immutable, validated rewriting rules
//!
//! A [`RuleSet`] is built once from a rule file (or a [`RuleConfig`]) and then
//! only read. Every mapping is compiled into a [`PhraseTrie`] at construction
//! time so rewriting never touches the raw tables.

pub mod config;
pub mod loader;

use std::fmt;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::matcher::find_occurrences;
use crate::tables::{AbbreviationTrie, PhraseTrie};

pub use config::{PhraseMap, RuleConfig, SentenceConfig, DEFAULT_CONJUNCTIONS};

/// Mapping categories in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Technical terms
    Jargon,
    /// Imperative or legal register
    Tone,
    /// Stock fragments
    Boilerplate,
    /// Document references
    Documents,
}

impl Category {
    /// All categories in pipeline order
    pub const ALL: [Category; 4] = [
        Category::Jargon,
        Category::Tone,
        Category::Boilerplate,
        Category::Documents,
    ];

    /// Section name in the rule file
    pub fn section(&self) -> &'static str {
        match self {
            Category::Jargon => "jargon",
            Category::Tone => "tone",
            Category::Boilerplate => "boilerplate",
            Category::Documents => "documents",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// One compiled trigger -> replacement table
#[derive(Debug, Clone)]
pub struct Mapping {
    category: Category,
    entries: Vec<(String, String)>,
    triggers: PhraseTrie,
}

impl Mapping {
    /// Compile a mapping, keeping declaration order
    ///
    /// Triggers that only differ by case or spacing keep the first
    /// declaration; later ones are logged and never match.
    pub fn new(category: Category, phrases: PhraseMap) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(phrases.len());
        let mut triggers = PhraseTrie::new();

        for (trigger, replacement) in phrases {
            if trigger.trim().is_empty() {
                return Err(ConfigError::EmptyTrigger {
                    section: category.section(),
                });
            }

            let entry = entries.len() as u32;
            if !triggers.insert(&trigger, entry) {
                log::warn!(
                    "[{}] trigger {:?} duplicates an earlier entry and will be ignored",
                    category,
                    trigger
                );
            }
            entries.push((trigger, replacement));
        }

        log::debug!("[{}] compiled {} triggers", category, triggers.len());

        Ok(Self {
            category,
            entries,
            triggers,
        })
    }

    /// Compile from `(trigger, replacement)` pairs
    pub fn from_pairs<I, K, V>(category: Category, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let phrases: PhraseMap = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(category, phrases)
    }

    /// Category this mapping belongs to
    pub fn category(&self) -> Category {
        self.category
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of declared entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replacement for a trigger, case-insensitive
    pub fn lookup(&self, trigger: &str) -> Option<&str> {
        self.triggers
            .get(trigger)
            .map(|entry| self.replacement(entry))
    }

    pub(crate) fn replacement(&self, entry: u32) -> &str {
        &self.entries[entry as usize].1
    }

    pub(crate) fn triggers(&self) -> &PhraseTrie {
        &self.triggers
    }
}

/// Validated rule set shared read-only by every rewriting call
#[derive(Debug, Clone)]
pub struct RuleSet {
    jargon: Mapping,
    tone: Mapping,
    boilerplate: Mapping,
    documents: Mapping,
    max_sentence_length: usize,
    abbreviations: AbbreviationTrie,
    conjunctions: Vec<String>,
    protected: PhraseTrie,
}

impl RuleSet {
    /// Create a rule set builder
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Validate and compile a configuration
    pub fn from_config(config: RuleConfig) -> Result<Self, ConfigError> {
        let max_sentence_length = config.threshold()?;
        config.validate_sentences()?;

        let RuleConfig {
            jargon,
            tone,
            documents,
            boilerplate,
            sentences,
            ..
        } = config;

        let jargon = Mapping::new(Category::Jargon, required(jargon, Category::Jargon)?)?;
        let tone = Mapping::new(Category::Tone, required(tone, Category::Tone)?)?;
        let documents = Mapping::new(
            Category::Documents,
            required(documents, Category::Documents)?,
        )?;
        let boilerplate = Mapping::new(
            Category::Boilerplate,
            required(boilerplate, Category::Boilerplate)?,
        )?;

        let abbreviations =
            AbbreviationTrie::with_builtin(sentences.abbreviations.iter().map(String::as_str));

        let conjunctions = match sentences.conjunctions {
            Some(list) => list.iter().map(|c| c.trim().to_lowercase()).collect(),
            None => DEFAULT_CONJUNCTIONS.iter().map(|c| c.to_string()).collect(),
        };

        // Trailing commas may be dropped when a sentence is split after them
        let protected = PhraseTrie::from_phrases(
            [&jargon, &tone, &boilerplate, &documents]
                .into_iter()
                .flat_map(|m| m.entries.iter())
                .map(|(_, r)| r.trim_end().trim_end_matches([',', ';', ':'])),
        );

        let rules = Self {
            jargon,
            tone,
            boilerplate,
            documents,
            max_sentence_length,
            abbreviations,
            conjunctions,
            protected,
        };

        for (category, trigger) in rules.shadowed_triggers() {
            log::warn!(
                "[{}] trigger {:?} contains a replacement phrase and will never match",
                category,
                trigger
            );
        }

        Ok(rules)
    }

    /// Triggers that contain some replacement phrase of the rule set
    ///
    /// Rewriting leaves text inside a replacement phrase alone, so these
    /// triggers can never fire.
    pub fn shadowed_triggers(&self) -> Vec<(Category, &str)> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| {
                self.mapping(category)
                    .entries()
                    .iter()
                    .map(move |(trigger, _)| (category, trigger.as_str()))
            })
            .filter(|(_, trigger)| !find_occurrences(&self.protected, trigger).is_empty())
            .collect()
    }

    /// Jargon mapping
    pub fn jargon(&self) -> &Mapping {
        &self.jargon
    }

    /// Tone mapping
    pub fn tone(&self) -> &Mapping {
        &self.tone
    }

    /// Boilerplate fragment mapping
    pub fn boilerplate(&self) -> &Mapping {
        &self.boilerplate
    }

    /// Document-name mapping
    pub fn documents(&self) -> &Mapping {
        &self.documents
    }

    /// Mapping for a category
    pub fn mapping(&self, category: Category) -> &Mapping {
        match category {
            Category::Jargon => &self.jargon,
            Category::Tone => &self.tone,
            Category::Boilerplate => &self.boilerplate,
            Category::Documents => &self.documents,
        }
    }

    /// Word count above which sentences are split
    pub fn max_sentence_length(&self) -> usize {
        self.max_sentence_length
    }

    /// Abbreviations that never end a sentence
    pub fn abbreviations(&self) -> &AbbreviationTrie {
        &self.abbreviations
    }

    /// Lowercased split conjunctions
    pub fn conjunctions(&self) -> &[String] {
        &self.conjunctions
    }

    /// Every replacement phrase of every mapping
    pub fn protected_phrases(&self) -> &PhraseTrie {
        &self.protected
    }
}

fn required(section: Option<PhraseMap>, category: Category) -> Result<PhraseMap, ConfigError> {
    section.ok_or(ConfigError::MissingSection(category.section()))
}

/// Fluent builder for programmatic rule sets
///
/// Every mapping section starts out present and empty.
#[derive(Debug)]
pub struct RuleSetBuilder {
    config: RuleConfig,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            config: RuleConfig {
                max_sentence_length: None,
                jargon: Some(IndexMap::new()),
                tone: Some(IndexMap::new()),
                documents: Some(IndexMap::new()),
                boilerplate: Some(IndexMap::new()),
                sentences: SentenceConfig::default(),
            },
        }
    }
}

impl RuleSetBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to a category
    pub fn rule(
        mut self,
        category: Category,
        trigger: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        let section = match category {
            Category::Jargon => &mut self.config.jargon,
            Category::Tone => &mut self.config.tone,
            Category::Boilerplate => &mut self.config.boilerplate,
            Category::Documents => &mut self.config.documents,
        };
        section
            .get_or_insert_with(IndexMap::new)
            .insert(trigger.into(), replacement.into());
        self
    }

    /// Add a jargon rule
    pub fn jargon(self, trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rule(Category::Jargon, trigger, replacement)
    }

    /// Add a tone rule
    pub fn tone(self, trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rule(Category::Tone, trigger, replacement)
    }

    /// Add a boilerplate rule
    pub fn boilerplate(self, trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rule(Category::Boilerplate, trigger, replacement)
    }

    /// Add a document-name rule
    pub fn document(self, trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rule(Category::Documents, trigger, replacement)
    }

    /// Set the sentence length threshold
    pub fn max_sentence_length(mut self, words: i64) -> Self {
        self.config.max_sentence_length = Some(words);
        self
    }

    /// Add an abbreviation
    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.config.sentences.abbreviations.push(abbreviation.into());
        self
    }

    /// Replace the split conjunctions
    pub fn conjunctions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sentences.conjunctions = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<RuleSet, ConfigError> {
        RuleSet::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleSet {
        RuleSet::builder()
            .jargon("periodic review", "regular review")
            .jargon("review", "check")
            .tone("must submit", "please share")
            .document("passport", "a copy of your passport")
            .max_sentence_length(12)
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let rules = sample();
        assert_eq!(rules.jargon().lookup("Periodic Review"), Some("regular review"));
        assert_eq!(rules.tone().lookup("MUST SUBMIT"), Some("please share"));
        assert_eq!(rules.jargon().lookup("unknown"), None);
    }

    #[test]
    fn test_entries_keep_declaration_order() {
        let rules = sample();
        let triggers: Vec<&str> = rules
            .jargon()
            .entries()
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(triggers, vec!["periodic review", "review"]);
    }

    #[test]
    fn test_missing_threshold() {
        let result = RuleSet::builder().jargon("a", "b").build();
        assert!(matches!(result, Err(ConfigError::InvalidThreshold(_))));
    }

    #[test]
    fn test_negative_threshold() {
        let result = RuleSet::builder().max_sentence_length(-1).build();
        assert!(matches!(result, Err(ConfigError::InvalidThreshold(v)) if v == "-1"));
    }

    #[test]
    fn test_empty_trigger() {
        let result = RuleSet::builder()
            .max_sentence_length(5)
            .tone("  ", "x")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::EmptyTrigger { section: "tone" })
        ));
    }

    #[test]
    fn test_missing_section() {
        let config = RuleConfig {
            max_sentence_length: Some(10),
            jargon: Some(IndexMap::new()),
            tone: Some(IndexMap::new()),
            documents: None,
            boilerplate: Some(IndexMap::new()),
            sentences: SentenceConfig::default(),
        };
        assert!(matches!(
            RuleSet::from_config(config),
            Err(ConfigError::MissingSection("documents"))
        ));
    }

    #[test]
    fn test_case_duplicate_keeps_first() {
        let mapping = Mapping::from_pairs(
            Category::Jargon,
            [("KYC", "identity check"), ("kyc", "other")],
        )
        .unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.lookup("kyc"), Some("identity check"));
    }

    #[test]
    fn test_protected_phrases_cover_all_categories() {
        let rules = sample();
        let protected = rules.protected_phrases();
        assert!(protected.get("regular review").is_some());
        assert!(protected.get("please share").is_some());
        assert!(protected.get("a copy of your passport").is_some());
        assert!(protected.get("passport").is_none());
    }

    #[test]
    fn test_shadowed_triggers() {
        let rules = RuleSet::builder()
            .jargon("review", "check")
            .jargon("ultimate beneficial owner", "owner")
            .tone("check", "look over")
            .max_sentence_length(10)
            .build()
            .unwrap();
        assert_eq!(
            rules.shadowed_triggers(),
            vec![
                (Category::Jargon, "ultimate beneficial owner"),
                (Category::Tone, "check"),
            ]
        );
        assert!(sample().shadowed_triggers().is_empty());
    }

    #[test]
    fn test_default_conjunctions() {
        let rules = sample();
        assert_eq!(rules.conjunctions(), &["and", "but", "or", "yet", "so"]);
        assert!(rules.abbreviations().is_abbreviation("etc"));
    }

    #[test]
    fn test_rule_set_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
