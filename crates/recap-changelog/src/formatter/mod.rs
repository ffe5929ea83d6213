//! Changelog formatting

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ChangelogAssembly;
use recap_core::config::RenderConfig;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format an assembly to a string
    fn format(&self, assembly: &ChangelogAssembly, config: &RenderConfig) -> String;

    /// File extension for this format
    fn extension(&self) -> &'static str;
}
