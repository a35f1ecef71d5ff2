//! Rule file schema
//!
//! Mirrors the TOML layout one to one. Mapping sections are optional at the
//! serde level so that a missing one is reported as
//! [`ConfigError::MissingSection`] instead of a generic parse error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ordered trigger -> replacement table
pub type PhraseMap = IndexMap<String, String>;

/// Root rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Word count above which a sentence is split
    pub max_sentence_length: Option<i64>,
    /// Technical terms
    pub jargon: Option<PhraseMap>,
    /// Imperative or legal register phrases
    pub tone: Option<PhraseMap>,
    /// Document references
    pub documents: Option<PhraseMap>,
    /// Stock fragments replaced verbatim
    pub boilerplate: Option<PhraseMap>,
    /// Sentence splitting settings
    #[serde(default)]
    pub sentences: SentenceConfig,
}

/// Sentence splitter settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceConfig {
    /// Abbreviations added to the built-in set
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Words a long sentence may be split before (default: and, but, or, yet, so)
    #[serde(default)]
    pub conjunctions: Option<Vec<String>>,
}

/// Conjunctions used when the rule file does not list any
pub const DEFAULT_CONJUNCTIONS: &[&str] = &["and", "but", "or", "yet", "so"];

impl RuleConfig {
    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validated threshold
    pub(crate) fn threshold(&self) -> Result<usize, ConfigError> {
        match self.max_sentence_length {
            Some(value) if value > 0 => usize::try_from(value)
                .map_err(|_| ConfigError::InvalidThreshold(value.to_string())),
            Some(value) => Err(ConfigError::InvalidThreshold(value.to_string())),
            None => Err(ConfigError::InvalidThreshold("nothing".to_string())),
        }
    }

    /// Validate sentence settings
    pub(crate) fn validate_sentences(&self) -> Result<(), ConfigError> {
        if self
            .sentences
            .abbreviations
            .iter()
            .any(|a| a.trim().trim_end_matches('.').is_empty())
        {
            return Err(ConfigError::EmptySentenceSetting("abbreviations"));
        }

        if let Some(conjunctions) = &self.sentences.conjunctions {
            if conjunctions.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigError::EmptySentenceSetting("conjunctions"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_declaration_order() {
        let config = RuleConfig::from_toml_str(
            r#"
max_sentence_length = 10

[jargon]
"zeta" = "z"
"alpha" = "a"
"mid" = "m"
"#,
        )
        .unwrap();

        let keys: Vec<&str> = config
            .jargon
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(config.tone.is_none());
    }

    #[test]
    fn test_threshold_validation() {
        let mut config = RuleConfig {
            max_sentence_length: Some(22),
            ..Default::default()
        };
        assert_eq!(config.threshold().unwrap(), 22);

        config.max_sentence_length = Some(0);
        assert!(matches!(
            config.threshold(),
            Err(ConfigError::InvalidThreshold(v)) if v == "0"
        ));

        config.max_sentence_length = None;
        assert!(config.threshold().is_err());
    }

    #[test]
    fn test_threshold_beyond_usize() {
        let config = RuleConfig {
            max_sentence_length: Some(i64::MAX),
            ..Default::default()
        };

        #[cfg(target_pointer_width = "64")]
        assert_eq!(config.threshold().unwrap(), i64::MAX as usize);

        #[cfg(not(target_pointer_width = "64"))]
        assert!(matches!(
            config.threshold(),
            Err(ConfigError::InvalidThreshold(value)) if value == i64::MAX.to_string()
        ));
    }

    #[test]
    fn test_float_threshold_is_parse_error() {
        let result = RuleConfig::from_toml_str("max_sentence_length = 2.5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = RuleConfig::from_toml_str("max_sentence_length = 5\n[jargn]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_conjunction_rejected() {
        let config = RuleConfig {
            sentences: SentenceConfig {
                abbreviations: vec![],
                conjunctions: Some(vec!["and".to_string(), " ".to_string()]),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate_sentences(),
            Err(ConfigError::EmptySentenceSetting("conjunctions"))
        ));
    }
}
