//! CLI definition and command handling

pub mod commands;

use clap::{Parser, Subcommand};

use commands::{ProjectsCommand, RepositoryCommand};

/// Recap - turns commit history into a grouped changelog
#[derive(Debug, Parser)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Suppress output except the changelog and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Changelog for a single repository
    #[command(alias = "r")]
    Repository(RepositoryCommand),

    /// Changelog across all configured projects
    #[command(alias = "p")]
    Projects(ProjectsCommand),
}

impl Cli {
    /// Dispatch to the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Repository(cmd) => cmd.execute(self),
            Commands::Projects(cmd) => cmd.execute(self),
        }
    }
}
