//! Validate command implementation

use anyhow::Result;
use clap::Args;
use clearspeak_core::{Category, RuleSet};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the rule file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub rules: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule file: {}", self.rules.display());

        match RuleSet::from_file(&self.rules) {
            Ok(rules) => {
                println!("✓ Rules are valid!");
                for category in Category::ALL {
                    println!("  {}: {} rules", category, rules.mapping(category).len());
                }
                println!(
                    "  max_sentence_length: {} words",
                    rules.max_sentence_length()
                );

                let shadowed = rules.shadowed_triggers();
                if !shadowed.is_empty() {
                    println!("  Warning: {} triggers can never match:", shadowed.len());
                    for (category, trigger) in shadowed {
                        println!("    [{category}] {trigger:?}");
                    }
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Rules are invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
