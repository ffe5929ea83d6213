//! Recap Changelog - commit classification and aggregation
//!
//! This crate turns raw commit records into typed changelog entries and
//! aggregates them across branches and projects into a grouped,
//! deterministically ordered changelog assembly.

pub mod aggregator;
pub mod formatter;
pub mod parser;
pub mod trailer;
pub mod types;
pub mod walker;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregator::{Aggregation, Aggregator, CancelFlag, TraversalTarget};
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use parser::{CommitParser, ConventionalParser, ParserConfig};
pub use trailer::{split_message, Trailers};
pub use types::{ChangelogAssembly, ChangelogEntry, CommitKind, GroupKey, Section};
pub use walker::{HistoryWalker, VisitedSet};
