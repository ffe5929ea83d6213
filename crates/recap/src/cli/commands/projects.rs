//! Projects command

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use console::style;
use tracing::{info, warn};

use recap_changelog::{Aggregator, TraversalTarget};
use recap_core::config::{load_config, load_config_from_dir, Config};
use recap_core::snapshot::{SnapshotBuilder, SnapshotHistory};
use recap_git::{clone_or_open, CommitSource, GitRepo, ProjectSet};

use crate::cli::Cli;

use super::{build_parser, report};

/// Generate a changelog across all configured projects
#[derive(Debug, Args)]
pub struct ProjectsCommand {
    /// Config file (default: discovered from the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only include commits since the last recorded snapshot
    #[arg(long)]
    pub since_last: bool,

    /// Record the walked branch heads as a new snapshot
    #[arg(long)]
    pub snapshot: bool,
}

impl ProjectsCommand {
    /// Execute the projects command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => {
                let cwd = std::env::current_dir()?;
                load_config_from_dir(&cwd)?.0
            }
        };

        if config.projects.is_empty() {
            bail!("no projects configured");
        }

        let (source, targets) = open_projects(cli, &config)?;

        let mut history = SnapshotHistory::load_or_default(&config.snapshot_file)?;

        let mut aggregator = Aggregator::new()
            .with_parser(build_parser(&config))
            .with_team_groups(config.changelog.group_by_team);

        if self.since_last {
            match history.last() {
                Some(last) => {
                    info!(digest = last.digest(), "bounding run at last snapshot");
                    aggregator = aggregator.with_stop_hashes(last.stop_hashes());
                }
                None => warn!("no snapshot recorded yet, walking full history"),
            }
        }

        let aggregation = aggregator.aggregate(&source, &targets)?;
        report(cli, &config, &aggregation);

        if self.snapshot {
            let snapshot = record_heads(&source, &targets);
            if let Some(snapshot) = snapshot {
                if !cli.quiet {
                    eprintln!(
                        "{} snapshot {} recorded",
                        style("ok:").green().bold(),
                        &snapshot.digest()[..12]
                    );
                }
                history.push(snapshot);
                history.save(&config.snapshot_file)?;
            }
        }

        Ok(())
    }
}

/// Open every configured project and derive the traversal targets
fn open_projects(cli: &Cli, config: &Config) -> anyhow::Result<(ProjectSet, Vec<TraversalTarget>)> {
    let mut source = ProjectSet::new();
    let mut targets = Vec::new();

    for project in &config.projects {
        let branches = project.effective_branches(&config.default_branch);

        let repo = match (&project.path, &project.origin) {
            (Some(path), _) => GitRepo::open(path)
                .with_context(|| format!("opening project {}", project.name))?,
            (None, Some(origin)) => {
                let repo = clone_or_open(origin)
                    .with_context(|| format!("cloning project {}", project.name))?;
                for branch in &branches {
                    if let Err(err) = repo.fetch_branch(branch) {
                        warn!(project = %project.name, branch = %branch, %err, "fetch failed");
                        if !cli.quiet {
                            eprintln!(
                                "{} {}/{}: {}",
                                style("warning:").yellow().bold(),
                                project.name,
                                branch,
                                err
                            );
                        }
                    }
                }
                repo
            }
            // Validation rejects this shape at load time.
            (None, None) => bail!("project {} has neither path nor origin", project.name),
        };

        for branch in branches {
            targets.push(TraversalTarget::new(&project.name, branch));
        }
        source.add(&project.name, repo);
    }

    Ok((source, targets))
}

/// Resolve and record the current head of every target
fn record_heads(source: &ProjectSet, targets: &[TraversalTarget]) -> Option<recap_core::Snapshot> {
    let mut builder = SnapshotBuilder::new();
    for target in targets {
        match source.resolve(&target.project, &target.branch) {
            Ok(head) => builder.record(&target.project, &target.branch, head),
            Err(err) => {
                warn!(project = %target.project, branch = %target.branch, %err, "head not recorded")
            }
        }
    }

    (!builder.is_empty()).then(|| builder.build())
}
