//! History traversal
//!
//! The walker pulls commit records lazily, depth-first over the first
//! parent before remaining parents. The visited set is the single source
//! of truth for deduplication: threading one set through every walker of
//! a run makes merge commits and shared branch ancestry appear exactly
//! once.

use std::collections::HashSet;

use recap_core::error::AggregateWarning;
use recap_git::{CommitRecord, CommitSource};

/// Commit hashes already emitted or walked past
///
/// Grows monotonically for the duration of one aggregation run. Seeding
/// it up front turns it into a stop set: traversal never descends past a
/// seeded hash.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    hashes: HashSet<String>,
}

impl VisitedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set pre-seeded with stop hashes
    pub fn seeded<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hashes: hashes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a hash has been visited
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Mark a hash as visited
    pub fn insert(&mut self, hash: impl Into<String>) -> bool {
        self.hashes.insert(hash.into())
    }

    /// Number of visited hashes
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether nothing has been visited
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// Lazy iterator over the unvisited history reachable from a start hash
///
/// A commit that fails to load is recorded as a warning and treated as a
/// history boundary: the path is pruned, traversal continues elsewhere.
pub struct HistoryWalker<'a, S: CommitSource + ?Sized> {
    source: &'a S,
    visited: &'a mut VisitedSet,
    warnings: &'a mut Vec<AggregateWarning>,
    pending: Vec<String>,
}

impl<'a, S: CommitSource + ?Sized> HistoryWalker<'a, S> {
    /// Start a traversal at the given commit
    pub fn new(
        source: &'a S,
        start: String,
        visited: &'a mut VisitedSet,
        warnings: &'a mut Vec<AggregateWarning>,
    ) -> Self {
        Self {
            source,
            visited,
            warnings,
            pending: vec![start],
        }
    }
}

impl<S: CommitSource + ?Sized> Iterator for HistoryWalker<'_, S> {
    type Item = CommitRecord;

    fn next(&mut self) -> Option<CommitRecord> {
        while let Some(hash) = self.pending.pop() {
            if self.visited.contains(&hash) {
                continue;
            }

            match self.source.load(&hash) {
                Ok(record) => {
                    self.visited.insert(hash);
                    // Reverse push keeps the first parent on top of the
                    // stack, walked before remaining parents.
                    for parent in record.parent_hashes.iter().rev() {
                        if !self.visited.contains(parent) {
                            self.pending.push(parent.clone());
                        }
                    }
                    return Some(record);
                }
                Err(err) => {
                    self.visited.insert(hash.clone());
                    self.warnings.push(AggregateWarning::UnreadableCommit {
                        hash,
                        reason: err.to_string(),
                    });
                }
            }
        }

        None
    }
}
