//! Rule set loading from TOML files and the embedded default rules

use std::path::Path;

use super::{RuleConfig, RuleSet};
use crate::error::ConfigError;

/// Default KYC correspondence rules shipped with the crate
pub const BUILTIN_RULES: &str = include_str!("../../configs/rules/kyc.toml");

impl RuleSet {
    /// Load and validate rules from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = RuleConfig::from_toml_str(content)?;
        Self::from_config(config)
    }

    /// Load and validate rules from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loading rules from {}", path.display());
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse(msg) => {
                ConfigError::Parse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// The embedded default rules
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_RULES).expect("Embedded rule file should always be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_rules_load() {
        let rules = RuleSet::builtin();
        assert!(!rules.jargon().is_empty());
        assert!(!rules.tone().is_empty());
        assert!(!rules.documents().is_empty());
        assert!(!rules.boilerplate().is_empty());
        assert_eq!(rules.max_sentence_length(), 22);
        assert!(rules.shadowed_triggers().is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
max_sentence_length = 8

[jargon]
"periodic review" = "regular review"

[tone]

[documents]

[boilerplate]
"#
        )
        .unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        assert_eq!(rules.max_sentence_length(), 8);
        assert_eq!(rules.jargon().len(), 1);
        assert!(rules.tone().is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let result = RuleSet::from_file("/nonexistent/rules.toml");
        match result {
            Err(ConfigError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/rules.toml"))
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "max_sentence_length = [").unwrap();

        let err = RuleSet::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err
            .to_string()
            .contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_section_in_text() {
        let result = RuleSet::from_toml_str(
            r#"
max_sentence_length = 8
[jargon]
[tone]
[documents]
"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::MissingSection("boilerplate"))
        ));
    }
}
