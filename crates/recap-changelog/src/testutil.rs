//! In-memory commit source for engine tests

use std::collections::HashMap;

use chrono::Utc;

use recap_core::error::GitError;
use recap_git::{CommitRecord, CommitSource};

/// Commit source backed by hand-built records, no repository involved
#[derive(Default)]
pub(crate) struct MemorySource {
    branches: HashMap<(String, String), String>,
    commits: HashMap<String, CommitRecord>,
}

impl MemorySource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a branch tip for a (project, branch) pair
    pub(crate) fn add_branch(&mut self, project: &str, branch: &str, head: &str) {
        self.branches
            .insert((project.to_string(), branch.to_string()), head.to_string());
    }

    /// Register a commit with the given message and parent hashes
    pub(crate) fn add_commit(&mut self, hash: &str, message: &str, parents: &[&str]) {
        let record = CommitRecord::new(hash, message, "Test Author", "test@example.com", Utc::now())
            .with_parents(parents.iter().copied());
        self.commits.insert(hash.to_string(), record);
    }
}

impl CommitSource for MemorySource {
    fn resolve(&self, project: &str, branch: &str) -> Result<String, GitError> {
        self.branches
            .get(&(project.to_string(), branch.to_string()))
            .cloned()
            .ok_or_else(|| GitError::BranchNotFound {
                project: project.to_string(),
                branch: branch.to_string(),
            })
    }

    fn load(&self, hash: &str) -> Result<CommitRecord, GitError> {
        self.commits
            .get(hash)
            .cloned()
            .ok_or_else(|| GitError::CommitNotFound(hash.to_string()))
    }
}
