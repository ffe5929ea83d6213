//! Snapshot history
//!
//! A snapshot records the head commit of every (project, branch) pair at
//! the time of an aggregation run. Feeding the previous snapshot's heads
//! into the walker's stop set turns a full-history run into a
//! "changes since last run" changelog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::SnapshotError;

/// Branch name to head commit hash, for one project
pub type BranchHeads = BTreeMap<String, String>;

/// The recorded heads of one aggregation run, addressed by digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    digest: String,
    heads: BTreeMap<String, BranchHeads>,
}

impl Snapshot {
    /// Digest identifying this snapshot
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Recorded heads for one project
    pub fn project_heads(&self, project: &str) -> Option<&BranchHeads> {
        self.heads.get(project)
    }

    /// Every recorded head hash, for seeding a walker stop set
    pub fn stop_hashes(&self) -> Vec<String> {
        self.heads
            .values()
            .flat_map(|branches| branches.values().cloned())
            .collect()
    }
}

/// Accumulates (project, branch, head) records into a [`Snapshot`]
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    heads: BTreeMap<String, BranchHeads>,
}

impl SnapshotBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the head of one (project, branch) pair
    pub fn record(
        &mut self,
        project: impl Into<String>,
        branch: impl Into<String>,
        head: impl Into<String>,
    ) {
        self.heads
            .entry(project.into())
            .or_default()
            .insert(branch.into(), head.into());
    }

    /// Whether anything has been recorded
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Finalize into a digest-addressed snapshot
    ///
    /// The digest is computed over the BTreeMap iteration order, so two
    /// runs recording the same heads produce the same digest.
    pub fn build(self) -> Snapshot {
        let mut hasher = Sha256::new();
        for (project, branches) in &self.heads {
            hasher.update(project.as_bytes());
            for (branch, head) in branches {
                hasher.update(branch.as_bytes());
                hasher.update(head.as_bytes());
            }
        }

        Snapshot {
            digest: format!("{:x}", hasher.finalize()),
            heads: self.heads,
        }
    }
}

/// Append-only sequence of snapshots, persisted as YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
}

impl SnapshotHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a history, treating a missing file as empty
    pub fn load_or_default(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot history, starting empty");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let history = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "snapshot history loaded");
        Ok(history)
    }

    /// Persist the history
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), count = self.snapshots.len(), "snapshot history saved");
        Ok(())
    }

    /// The most recent snapshot
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Look up a snapshot by digest, newest first
    pub fn get(&self, digest: &str) -> Option<&Snapshot> {
        self.snapshots.iter().rev().find(|s| s.digest == digest)
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Append a snapshot
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}
