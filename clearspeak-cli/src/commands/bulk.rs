//! Bulk command implementation

use anyhow::{Context, Result};
use clap::Args;
use clearspeak_core::Simplifier;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::{load_simplifier, Verbosity};
use crate::input::{resolve_tree, FileReader};
use crate::progress::ProgressReporter;

/// Arguments for the bulk command
#[derive(Debug, Args)]
pub struct BulkArgs {
    /// Directory to read templates from (searched recursively)
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory to write rewritten files to, mirroring the input layout
    #[arg(long, value_name = "DIR")]
    pub output: PathBuf,

    /// File extensions to rewrite
    #[arg(long, value_name = "EXT", value_delimiter = ',', default_value = "txt,md,html")]
    pub ext: Vec<String>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Rule file (default: built-in KYC rules)
    #[arg(short, long, value_name = "FILE", env = "CLEARSPEAK_RULES")]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl BulkArgs {
    /// Execute the bulk command
    pub fn execute(&self) -> Result<()> {
        self.verbosity.init_logging();

        let simplifier = load_simplifier(self.rules.as_deref())?;
        let files = resolve_tree(&self.input, &self.ext)?;
        std::fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory: {}", self.output.display())
        })?;

        if files.is_empty() {
            log::warn!(
                "No files with extensions {:?} under {}",
                self.ext,
                self.input.display()
            );
            return Ok(());
        }

        let threads = self.threads.unwrap_or_else(num_cpus::get).max(1);
        log::info!("Rewriting {} files on {} threads", files.len(), threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker pool")?;

        let mut progress = ProgressReporter::new(self.verbosity.quiet);
        progress.init_files(files.len() as u64);

        let converted = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let target = self.convert(&simplifier, file)?;
                    log::info!("Converted {} -> {}", file.display(), target.display());
                    progress.file_completed(&file.display().to_string());
                    Ok(target)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        progress.finish();
        if !self.verbosity.quiet {
            println!(
                "Rewrote {} files into {}",
                converted.len(),
                self.output.display()
            );
        }

        Ok(())
    }

    /// Rewrite one file and return where it was written
    fn convert(&self, simplifier: &Simplifier, file: &Path) -> Result<PathBuf> {
        let relative = file
            .strip_prefix(&self.input)
            .with_context(|| format!("{} is outside {}", file.display(), self.input.display()))?;
        let target = self.output.join(relative);

        let content = FileReader::read_text(file)?;
        FileReader::write_text(&target, &simplifier.simplify(&content))?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn bulk_args(input: &Path, output: &Path) -> BulkArgs {
        BulkArgs {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            ext: vec!["txt".to_string(), "md".to_string(), "html".to_string()],
            threads: Some(2),
            rules: None,
            verbosity: Verbosity {
                quiet: true,
                verbose: 0,
            },
        }
    }

    #[test]
    fn test_bulk_mirrors_layout() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("letters/2024")).unwrap();
        fs::write(input.path().join("a.txt"), "Your kyc file.").unwrap();
        fs::write(
            input.path().join("letters/2024/b.md"),
            "Send bank statement.",
        )
        .unwrap();
        fs::write(input.path().join("letters/skip.pdf"), "kyc").unwrap();

        bulk_args(input.path(), output.path()).execute().unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("a.txt")).unwrap(),
            "Your identity check file."
        );
        assert_eq!(
            fs::read_to_string(output.path().join("letters/2024/b.md")).unwrap(),
            "Send a recent bank statement."
        );
        assert!(!output.path().join("letters/skip.pdf").exists());
    }

    #[test]
    fn test_bulk_empty_tree_still_creates_output_dir() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let target = output.path().join("simplified/2024");

        assert!(bulk_args(input.path(), &target).execute().is_ok());
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_bulk_missing_input_dir() {
        let output = TempDir::new().unwrap();
        let args = bulk_args(Path::new("/nonexistent/in"), output.path());
        assert!(args.execute().is_err());
    }
}
