//! JSON command implementation
//!
//! Accepts either an array of template objects or an object whose values
//! (at any depth) hold such arrays. Every object in an array that has the
//! text field gets the output field added next to it; everything else is
//! written back untouched.

use anyhow::{Context, Result};
use clap::Args;
use clearspeak_core::Simplifier;
use serde_json::Value;
use std::path::PathBuf;

use super::{load_simplifier, Verbosity};
use crate::error::CliError;
use crate::input::FileReader;

/// Arguments for the json command
#[derive(Debug, Args)]
pub struct JsonArgs {
    /// Source JSON file
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the rewritten JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Field holding the template text
    #[arg(long, value_name = "NAME", default_value = "text")]
    pub text_field: String,

    /// Field the rewritten text is written to
    #[arg(long, value_name = "NAME", default_value = "simplified_text")]
    pub output_field: String,

    /// Rule file (default: built-in KYC rules)
    #[arg(short, long, value_name = "FILE", env = "CLEARSPEAK_RULES")]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl JsonArgs {
    /// Execute the json command
    pub fn execute(&self) -> Result<()> {
        self.verbosity.init_logging();

        let simplifier = load_simplifier(self.rules.as_deref())?;
        let content = FileReader::read_text(&self.input)?;
        let payload: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", self.input.display()))?;

        let rewriter = JsonRewriter::new(&simplifier, &self.text_field, &self.output_field);
        let rewritten = rewriter.rewrite_payload(payload)?;

        let mut json = serde_json::to_string_pretty(&rewritten)?;
        json.push('\n');
        FileReader::write_text(&self.output, &json)?;

        log::info!(
            "Rewrote {} templates from {} into {}",
            rewriter.count(),
            self.input.display(),
            self.output.display()
        );
        Ok(())
    }
}

/// Adds rewritten text to template objects of a JSON payload
pub struct JsonRewriter<'a> {
    simplifier: &'a Simplifier,
    text_field: &'a str,
    output_field: &'a str,
    count: std::cell::Cell<usize>,
}

impl<'a> JsonRewriter<'a> {
    /// Create a rewriter reading `text_field` and writing `output_field`
    pub fn new(simplifier: &'a Simplifier, text_field: &'a str, output_field: &'a str) -> Self {
        Self {
            simplifier,
            text_field,
            output_field,
            count: std::cell::Cell::new(0),
        }
    }

    /// Number of templates rewritten so far
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Rewrite every template inside `payload`
    pub fn rewrite_payload(&self, payload: Value) -> Result<Value, CliError> {
        match payload {
            Value::Array(entries) => entries
                .into_iter()
                .map(|entry| self.rewrite_entry(entry))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| match value {
                    Value::Array(_) | Value::Object(_) => {
                        self.rewrite_payload(value).map(|value| (key, value))
                    }
                    other => Ok((key, other)),
                })
                .collect::<Result<serde_json::Map<_, _>, _>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }

    fn rewrite_entry(&self, entry: Value) -> Result<Value, CliError> {
        match entry {
            Value::Object(mut map) => {
                let Some(original) = map.get(self.text_field) else {
                    return Ok(Value::Object(map));
                };
                let Value::String(text) = original else {
                    return Err(CliError::InvalidPayload(format!(
                        "Expected '{}' to be a string, got {}",
                        self.text_field,
                        kind(original)
                    )));
                };

                let rewritten = self.simplifier.simplify(text);
                map.insert(self.output_field.to_string(), Value::String(rewritten));
                self.count.set(self.count.get() + 1);
                Ok(Value::Object(map))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.rewrite_entry(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearspeak_core::RuleSet;
    use serde_json::json;

    fn simplifier() -> Simplifier {
        Simplifier::new(
            RuleSet::builder()
                .jargon("kyc", "identity check")
                .max_sentence_length(20)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_array_of_templates() {
        let simplifier = simplifier();
        let rewriter = JsonRewriter::new(&simplifier, "text", "simplified_text");
        let out = rewriter
            .rewrite_payload(json!([
                {"id": 1, "text": "kyc due"},
                {"id": 2, "body": "kyc due"}
            ]))
            .unwrap();

        assert_eq!(
            out,
            json!([
                {"id": 1, "text": "kyc due", "simplified_text": "identity check due"},
                {"id": 2, "body": "kyc due"}
            ])
        );
        assert_eq!(rewriter.count(), 1);
    }

    #[test]
    fn test_nested_object_payload() {
        let simplifier = simplifier();
        let rewriter = JsonRewriter::new(&simplifier, "text", "out");
        let out = rewriter
            .rewrite_payload(json!({
                "version": 2,
                "templates": [{"text": "KYC"}],
                "groups": {"reminders": [[{"text": "kyc"}]]}
            }))
            .unwrap();

        assert_eq!(out["version"], 2);
        assert_eq!(out["templates"][0]["out"], "Identity check");
        assert_eq!(out["groups"]["reminders"][0][0]["out"], "identity check");
    }

    #[test]
    fn test_top_level_object_is_not_a_template() {
        let simplifier = simplifier();
        let rewriter = JsonRewriter::new(&simplifier, "text", "out");
        let payload = json!({"text": "kyc"});
        assert_eq!(rewriter.rewrite_payload(payload.clone()).unwrap(), payload);
    }

    #[test]
    fn test_existing_output_field_is_overwritten() {
        let simplifier = simplifier();
        let rewriter = JsonRewriter::new(&simplifier, "text", "out");
        let out = rewriter
            .rewrite_payload(json!([{"text": "kyc", "out": "stale"}]))
            .unwrap();
        assert_eq!(out[0]["out"], "identity check");
    }

    #[test]
    fn test_non_string_text_field() {
        let simplifier = simplifier();
        let rewriter = JsonRewriter::new(&simplifier, "text", "out");
        let err = rewriter
            .rewrite_payload(json!([{"text": 42}]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid payload: Expected 'text' to be a string, got number"
        );
    }
}
