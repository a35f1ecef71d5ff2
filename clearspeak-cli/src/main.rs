//! clearspeak command-line entry point

use clap::Parser;
use clearspeak_cli::commands::Commands;

/// Rewrite compliance text into client-readable language
#[derive(Debug, Parser)]
#[command(name = "clearspeak", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
