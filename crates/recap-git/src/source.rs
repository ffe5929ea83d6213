//! The commit source seam between the engine and the VCS backend

use recap_core::error::GitError;
use tracing::debug;

use crate::repository::GitRepo;
use crate::types::CommitRecord;

/// Interface the changelog engine walks history through
///
/// Both operations are fallible: a resolve failure skips the traversal
/// target, a load failure prunes the traversal path. Parent lookup rides
/// on the loaded record's `parent_hashes`.
pub trait CommitSource {
    /// Resolve a (project, branch) pair to a start commit hash
    fn resolve(&self, project: &str, branch: &str) -> Result<String, GitError>;

    /// Load one commit record by hash
    fn load(&self, hash: &str) -> Result<CommitRecord, GitError>;
}

/// A set of named repositories acting as one commit source
///
/// `resolve` routes by project name. `load` probes members in insertion
/// order: commit hashes are globally unique in practice, so the first
/// repository that knows the hash wins.
#[derive(Default)]
pub struct ProjectSet {
    projects: Vec<(String, GitRepo)>,
}

impl ProjectSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding a single repository
    pub fn single(name: impl Into<String>, repo: GitRepo) -> Self {
        let mut set = Self::new();
        set.add(name, repo);
        set
    }

    /// Register a repository under a project name
    pub fn add(&mut self, name: impl Into<String>, repo: GitRepo) {
        self.projects.push((name.into(), repo));
    }

    /// Registered project names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|(name, _)| name.as_str())
    }

    /// Whether the set holds no repositories
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn get(&self, name: &str) -> Option<&GitRepo> {
        self.projects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, repo)| repo)
    }
}

impl CommitSource for ProjectSet {
    fn resolve(&self, project: &str, branch: &str) -> Result<String, GitError> {
        let repo = self
            .get(project)
            .ok_or_else(|| GitError::ProjectNotFound(project.to_string()))?;
        let hash = repo.resolve_branch(branch)?;
        debug!(project, branch, hash, "resolved traversal target");
        Ok(hash)
    }

    fn load(&self, hash: &str) -> Result<CommitRecord, GitError> {
        for (_, repo) in &self.projects {
            if let Ok(record) = repo.load_commit(hash) {
                return Ok(record);
            }
        }
        Err(GitError::CommitNotFound(hash.to_string()))
    }
}
