//! Raw commit data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The minimal normalized unit the changelog engine consumes
///
/// A record is immutable once loaded; more than one parent hash denotes a
/// merge commit. `message` is the raw text including subject, body and
/// any trailer block - the engine re-parses trailers itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Parent hashes in commit order
    pub parent_hashes: Vec<String>,
    /// Raw commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitRecord {
    /// Create a new CommitRecord
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            parent_hashes: Vec::new(),
            message: message.into(),
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }

    /// Set the parent hashes
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_hashes = parents.into_iter().map(Into::into).collect();
        self
    }

    /// First line of the raw message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Whether this commit has more than one parent
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_record() {
        let record = CommitRecord::new(
            "abc1234567890",
            "feat: add feature\n\nbody text",
            "Author",
            "author@example.com",
            Utc::now(),
        );
        assert_eq!(record.short_hash, "abc1234");
        assert_eq!(record.subject(), "feat: add feature");
        assert!(!record.is_merge());
    }

    #[test]
    fn test_merge_detection() {
        let record = CommitRecord::new("abc", "Merge branch 'x'", "A", "a@b.c", Utc::now())
            .with_parents(["p1", "p2"]);
        assert!(record.is_merge());
        assert_eq!(record.parent_hashes, vec!["p1", "p2"]);
    }
}
