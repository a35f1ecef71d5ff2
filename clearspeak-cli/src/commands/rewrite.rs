//! Rewrite command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::{load_simplifier, Verbosity};
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the rewrite command
#[derive(Debug, Args)]
pub struct RewriteArgs {
    /// Input files or patterns (supports glob); reads stdin when neither this nor --text is given
    #[arg(short, long, value_name = "FILE/PATTERN", conflicts_with = "text")]
    pub input: Vec<String>,

    /// Rewrite this text instead of reading files
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Rule file (default: built-in KYC rules)
    #[arg(short, long, value_name = "FILE", env = "CLEARSPEAK_RULES")]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rewritten text only
    Text,
    /// JSON array with source, rewritten text and a changed flag
    Json,
}

impl RewriteArgs {
    /// Execute the rewrite command
    pub fn execute(&self) -> Result<()> {
        self.verbosity.init_logging();

        log::info!("Starting rewrite");
        log::debug!("Arguments: {:?}", self);

        let simplifier = load_simplifier(self.rules.as_deref())?;
        let mut formatter = self.create_formatter()?;

        for (source, text) in self.documents()? {
            let rewritten = simplifier.simplify(&text);
            if rewritten != text {
                log::info!("Rewrote {}", source);
            }
            formatter.format_document(&source, &text, &rewritten)?;
        }

        formatter.finish()
    }

    /// `(source, text)` pairs to rewrite, in order
    fn documents(&self) -> Result<Vec<(String, String)>> {
        if let Some(text) = &self.text {
            return Ok(vec![("<text>".to_string(), text.clone())]);
        }

        if self.input.is_empty() {
            return Ok(vec![("<stdin>".to_string(), FileReader::read_stdin()?)]);
        }

        resolve_patterns(&self.input)?
            .into_iter()
            .map(|path| {
                let text = FileReader::read_text(&path)?;
                Ok((path.display().to_string(), text))
            })
            .collect()
    }

    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> RewriteArgs {
        RewriteArgs {
            input: Vec::new(),
            text: None,
            output: None,
            format: OutputFormat::Text,
            rules: None,
            verbosity: Verbosity {
                quiet: true,
                verbose: 0,
            },
        }
    }

    #[test]
    fn test_rewrite_text_to_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.txt");

        let args = RewriteArgs {
            text: Some("Your kyc periodic review is due.".to_string()),
            output: Some(output.clone()),
            ..args()
        };
        args.execute().unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Your identity check regular review is due.\n"
        );
    }

    #[test]
    fn test_rewrite_files_as_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "Send bank statement").unwrap();
        fs::write(dir.path().join("b.txt"), "Thank you").unwrap();
        let output = dir.path().join("out.json");

        let args = RewriteArgs {
            input: vec![format!("{}/*.txt", dir.path().display())],
            output: Some(output.clone()),
            format: OutputFormat::Json,
            ..args()
        };
        args.execute().unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let docs = value.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["changed"], true);
        assert_eq!(docs[1]["text"], "Thank you");
        assert_eq!(docs[1]["changed"], false);
    }

    #[test]
    fn test_missing_input_pattern_fails() {
        let args = RewriteArgs {
            input: vec!["/nonexistent/*.txt".to_string()],
            ..args()
        };
        assert!(args.execute().is_err());
    }
}
