//! File pattern resolution using glob

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}

/// Every file under `root` whose extension is in `extensions`
///
/// Extensions are compared without the leading dot and ignoring ASCII case.
pub fn resolve_tree(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root.display().to_string()).into());
    }

    let root_str = root
        .to_str()
        .ok_or_else(|| CliError::InvalidPattern(root.display().to_string()))?;
    let pattern = format!("{}/**/*", Pattern::escape(root_str));

    let mut files = Vec::new();
    for path_result in glob(&pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))? {
        let path = path_result.with_context(|| format!("Error walking {}", root.display()))?;
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
