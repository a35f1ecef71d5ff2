//! CLI command implementations

use anyhow::Result;
use clap::{Args, Subcommand};
use clearspeak_core::Simplifier;
use std::path::Path;

use crate::error::CliError;

pub mod bulk;
pub mod generate_config;
pub mod json;
pub mod rewrite;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite text from files, the command line or stdin
    Rewrite(rewrite::RewriteArgs),

    /// Rewrite every matching file of a directory tree into another directory
    Bulk(bulk::BulkArgs),

    /// Add rewritten text next to the text field of a JSON payload
    Json(json::JsonArgs),

    /// Check a rule file without rewriting anything
    Validate(validate::ValidateArgs),

    /// Write a commented rule file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Rewrite(args) => args.execute(),
            Commands::Bulk(args) => args.execute(),
            Commands::Json(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Logging flags shared by the rewriting commands
#[derive(Debug, Clone, Default, Args)]
pub struct Verbosity {
    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Verbosity {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A second init (e.g. from tests) keeps the first logger
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Simplifier over `rules`, or over the built-in rules when absent
pub fn load_simplifier(rules: Option<&Path>) -> Result<Simplifier> {
    match rules {
        Some(path) => {
            log::info!("Loading rules from {}", path.display());
            Simplifier::from_file(path).map_err(|e| CliError::ConfigError(e.to_string()).into())
        }
        None => {
            log::info!("Using built-in rules");
            Ok(Simplifier::builtin())
        }
    }
}
