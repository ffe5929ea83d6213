//! Error types for recap

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors raised by the VCS collaborator
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No project with the given name is registered
    #[error("Unknown project: {0}")]
    ProjectNotFound(String),

    /// Branch could not be resolved to a commit
    #[error("Branch {branch} not found in project {project}")]
    BranchNotFound { project: String, branch: String },

    /// Commit could not be loaded
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Failed to clone a remote origin
    #[error("Failed to clone {origin}: {reason}")]
    CloneFailed { origin: String, reason: String },

    /// Failed to fetch a branch
    #[error("Failed to fetch branch {branch}: {reason}")]
    FetchFailed { branch: String, reason: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Fatal aggregation errors
///
/// Per-target failures are warnings, not errors; the only fatal condition
/// is a run in which no target resolved at all.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Every configured traversal target failed to resolve
    #[error("all {count} traversal targets failed to resolve")]
    AllTargetsFailed { count: usize },
}

/// Non-fatal conditions accumulated during an aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateWarning {
    /// A configured (project, branch) could not be resolved to a commit
    #[error("target {project}/{branch} could not be resolved: {reason}")]
    UnresolvableTarget {
        project: String,
        branch: String,
        reason: String,
    },

    /// A referenced commit could not be loaded; that path was pruned
    #[error("commit {hash} could not be loaded: {reason}")]
    UnreadableCommit { hash: String, reason: String },
}
