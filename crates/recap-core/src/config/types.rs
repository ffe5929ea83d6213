//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{default_branch, default_snapshot_file, default_team_trailer};

/// Top-level recap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Branch walked when a project does not list any
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Trailer token resolved into team attribution
    #[serde(default = "default_team_trailer")]
    pub team_trailer: String,

    /// Projects whose history feeds the changelog
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    /// Rendering options
    #[serde(default)]
    pub changelog: RenderConfig,

    /// Where the snapshot history is persisted
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
            team_trailer: default_team_trailer(),
            projects: Vec::new(),
            changelog: RenderConfig::default(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

/// One project entry in the configuration
///
/// Exactly one of `origin` and `path` must be set: `origin` points at a
/// remote to clone into the cache, `path` at a repository on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name used in traversal targets and provenance
    pub name: String,

    /// Remote origin URL
    #[serde(default)]
    pub origin: Option<String>,

    /// Local repository path
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Branches to walk; empty means the configured default branch
    #[serde(default)]
    pub branches: Vec<String>,
}

impl ProjectConfig {
    /// Branches to walk, falling back to the given default
    pub fn effective_branches(&self, default_branch: &str) -> Vec<String> {
        if self.branches.is_empty() {
            vec![default_branch.to_string()]
        } else {
            self.branches.clone()
        }
    }
}

/// Rendering options for the formatted changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Whether to include short commit hashes
    pub include_hashes: bool,

    /// Whether to include authors
    pub include_authors: bool,

    /// Whether to include (project, branch) provenance
    pub include_sources: bool,

    /// Whether to sub-group sections by team attribution
    pub group_by_team: bool,

    /// Commit types excluded from the rendered changelog
    #[serde(default)]
    pub exclude_types: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            include_hashes: true,
            include_authors: false,
            include_sources: false,
            group_by_team: false,
            exclude_types: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.team_trailer, "team");
        assert!(config.projects.is_empty());
        assert!(config.changelog.include_hashes);
    }

    #[test]
    fn test_effective_branches() {
        let mut project = ProjectConfig {
            name: "api".to_string(),
            origin: None,
            path: Some(PathBuf::from(".")),
            branches: Vec::new(),
        };
        assert_eq!(project.effective_branches("main"), vec!["main"]);

        project.branches = vec!["develop".to_string(), "release".to_string()];
        assert_eq!(
            project.effective_branches("main"),
            vec!["develop", "release"]
        );
    }
}
