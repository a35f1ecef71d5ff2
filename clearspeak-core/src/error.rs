//! Rule configuration errors
//!
//! Rewriting itself never fails; every error in this crate is raised while a
//! [`RuleSet`](crate::RuleSet) is being built.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or incomplete rule configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Rule file could not be read
    #[error("Failed to read rule file '{}': {source}", path.display())]
    Io {
        /// Path of the rule file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Rule source is not valid TOML or has the wrong shape
    #[error("Failed to parse rules: {0}")]
    Parse(String),

    /// A required mapping section is absent
    #[error("Missing required section [{0}]")]
    MissingSection(&'static str),

    /// A trigger phrase is empty or whitespace only
    #[error("Empty trigger phrase in [{section}]")]
    EmptyTrigger {
        /// Section holding the empty key
        section: &'static str,
    },

    /// `max_sentence_length` is absent or not a positive integer
    #[error("max_sentence_length must be a positive integer, got {0}")]
    InvalidThreshold(String),

    /// An abbreviation or conjunction entry is empty
    #[error("Empty entry in sentences.{0}")]
    EmptySentenceSetting(&'static str),
}

/// Result type for rule construction
pub type Result<T> = std::result::Result<T, ConfigError>;
