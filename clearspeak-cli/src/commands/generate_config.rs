//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

/// Commented rule file template
const TEMPLATE: &str = r#"# clearspeak rule file
#
# Every mapping section is required, even when empty. Keys are trigger
# phrases, matched case-insensitively on word boundaries; values are the
# replacement phrases. When two triggers start at the same place the longer
# one wins. A trigger that contains any replacement phrase never matches.

# Sentences with more words than this are split at a conjunction or semicolon
max_sentence_length = 22

# Technical terms, rewritten first
[jargon]
"kyc" = "identity check"
"periodic review" = "regular review"

# Imperative or legal phrasing
[tone]
"you must submit" = "please share"

# Stock fragments, rewritten after the tone phrases
[boilerplate]
"we reserve the right to" = "we may"

# Document references, expanded into what the client should send
[documents]
"certificate of incorporation" = "a copy of your Certificate of Incorporation"

# Optional sentence splitting settings
[sentences]
# Extra abbreviations that never end a sentence (common ones are built in)
abbreviations = ["Cert", "Reg"]
# Words a long sentence may be split before
conjunctions = ["and", "but", "or", "yet", "so"]
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating rule file template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Rule file template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the rule file to add your own phrases");
        println!("2. Validate your rules:");
        println!("   clearspeak validate --rules {}", self.output.display());
        println!("3. Use them for rewriting:");
        println!(
            "   clearspeak rewrite -i letter.txt --rules {}",
            self.output.display()
        );

        Ok(())
    }
}
