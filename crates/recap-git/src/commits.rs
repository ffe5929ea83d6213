//! Commit loading and branch resolution

use chrono::{TimeZone, Utc};
use git2::{BranchType, Oid};

use recap_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitRecord;

impl GitRepo {
    /// Resolve a branch name to the hash of its tip commit
    ///
    /// Local branches are checked first, then `origin/<branch>`
    /// remote-tracking refs, which covers bare cache clones.
    pub fn resolve_branch(&self, branch: &str) -> Result<String> {
        if let Ok(found) = self.repo.find_branch(branch, BranchType::Local) {
            if let Some(target) = found.get().target() {
                return Ok(target.to_string());
            }
        }

        let remote_name = format!("origin/{}", branch);
        if let Ok(found) = self.repo.find_branch(&remote_name, BranchType::Remote) {
            if let Some(target) = found.get().target() {
                return Ok(target.to_string());
            }
        }

        Err(GitError::BranchNotFound {
            project: self.path().display().to_string(),
            branch: branch.to_string(),
        })
    }

    /// Load a single commit into a record
    pub fn load_commit(&self, hash: &str) -> Result<CommitRecord> {
        let oid = Oid::from_str(hash).map_err(|_| GitError::CommitNotFound(hash.to_string()))?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|_| GitError::CommitNotFound(hash.to_string()))?;
        Ok(commit_to_record(&commit))
    }
}

/// Convert a git2 Commit to a CommitRecord
fn commit_to_record(commit: &git2::Commit<'_>) -> CommitRecord {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit.message().unwrap_or("").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let parents: Vec<String> = commit.parent_ids().map(|id| id.to_string()).collect();

    CommitRecord::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_parents(parents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn commit_file(
        repo: &Repository,
        name: &str,
        message: &str,
        parents: &[&git2::Commit<'_>],
    ) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let workdir = repo.workdir().unwrap();
        std::fs::write(workdir.join(name), name).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, parents)
            .unwrap()
    }

    fn setup_repo() -> (TempDir, GitRepo, Oid, Oid) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let first = commit_file(&repo, "a.txt", "chore: initial commit", &[]);
        let parent = repo.find_commit(first).unwrap();
        let second = commit_file(&repo, "b.txt", "feat: add file", &[&parent]);

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo, first, second)
    }

    #[test]
    fn test_resolve_branch() {
        let (_temp, repo, _first, second) = setup_repo();
        // Repository::init leaves HEAD on the default branch
        let head = repo.repo.head().unwrap();
        let branch = head.shorthand().unwrap().to_string();

        let resolved = repo.resolve_branch(&branch).unwrap();
        assert_eq!(resolved, second.to_string());
    }

    #[test]
    fn test_resolve_missing_branch() {
        let (_temp, repo, _first, _second) = setup_repo();
        assert!(repo.resolve_branch("no-such-branch").is_err());
    }

    #[test]
    fn test_load_commit_with_parents() {
        let (_temp, repo, first, second) = setup_repo();

        let record = repo.load_commit(&second.to_string()).unwrap();
        assert_eq!(record.subject(), "feat: add file");
        assert_eq!(record.parent_hashes, vec![first.to_string()]);
        assert_eq!(record.author, "Test");

        let root = repo.load_commit(&first.to_string()).unwrap();
        assert!(root.parent_hashes.is_empty());
    }

    #[test]
    fn test_load_missing_commit() {
        let (_temp, repo, _first, _second) = setup_repo();
        assert!(repo.load_commit("not-a-hash").is_err());
        assert!(repo
            .load_commit("0123456789012345678901234567890123456789")
            .is_err());
    }
}
