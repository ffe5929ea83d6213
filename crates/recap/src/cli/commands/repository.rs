//! Repository command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use recap_changelog::{Aggregator, TraversalTarget};
use recap_core::config::load_config_or_default;
use recap_git::{GitRepo, ProjectSet};

use crate::cli::Cli;

use super::{build_parser, report};

/// Generate a changelog for a single repository
#[derive(Debug, Args)]
pub struct RepositoryCommand {
    /// Repository path
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Branch to walk; repeatable (default: the configured default branch)
    #[arg(short, long = "branch")]
    pub branches: Vec<String>,
}

impl RepositoryCommand {
    /// Execute the repository command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let (config, _) = load_config_or_default(&self.path);

        let repo = GitRepo::discover(&self.path)?;
        let name = repo
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string());

        let branches = if self.branches.is_empty() {
            vec![config.default_branch.clone()]
        } else {
            self.branches.clone()
        };
        info!(repository = %name, ?branches, "aggregating single repository");

        let targets: Vec<TraversalTarget> = branches
            .iter()
            .map(|branch| TraversalTarget::new(&name, branch))
            .collect();
        let source = ProjectSet::single(&name, repo);

        let aggregation = Aggregator::new()
            .with_parser(build_parser(&config))
            .with_team_groups(config.changelog.group_by_team)
            .aggregate(&source, &targets)?;

        report(cli, &config, &aggregation);
        Ok(())
    }
}
