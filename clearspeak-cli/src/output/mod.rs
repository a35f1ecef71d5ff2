//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one rewritten document
    ///
    /// `source` names where the text came from (a path, `<stdin>` or `<text>`).
    fn format_document(&mut self, source: &str, original: &str, rewritten: &str) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
