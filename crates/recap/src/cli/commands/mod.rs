//! Command implementations

mod projects;
mod repository;

pub use projects::ProjectsCommand;
pub use repository::RepositoryCommand;

use console::style;
use tracing::warn;

use recap_changelog::{
    Aggregation, ChangelogFormatter, CommitKind, ConventionalParser, MarkdownFormatter,
    ParserConfig,
};
use recap_core::config::Config;

use crate::cli::Cli;

/// Build the parser configured by the manifest
pub(crate) fn build_parser(config: &Config) -> ConventionalParser {
    let mut parser_config =
        ParserConfig::default().with_team_trailer(config.team_trailer.clone());

    for name in &config.changelog.exclude_types {
        match name.parse::<CommitKind>() {
            Ok(kind) => parser_config = parser_config.exclude_kind(kind),
            Err(()) => warn!(kind = %name, "ignoring unknown commit type in exclude_types"),
        }
    }

    ConventionalParser::with_config(parser_config)
}

/// Print warnings to stderr and the formatted changelog to stdout
pub(crate) fn report(cli: &Cli, config: &Config, aggregation: &Aggregation) {
    if !cli.quiet {
        for warning in &aggregation.warnings {
            eprintln!("{} {}", style("warning:").yellow().bold(), warning);
        }
    }

    let formatter = MarkdownFormatter::new();
    print!("{}", formatter.format(&aggregation.assembly, &config.changelog));
}
