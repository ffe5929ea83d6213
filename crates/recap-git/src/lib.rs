//! Recap Git - git-backed commit source
//!
//! This crate is the VCS collaborator of the changelog engine: it
//! resolves branches to start commits, loads raw commit records, and
//! maintains cached clones of remote origins.

mod commits;
mod remote;
mod repository;
mod source;
pub mod types;

pub use remote::{cache_dir, clone_or_open};
pub use repository::{GitRepo, Result};
pub use source::{CommitSource, ProjectSet};
pub use types::CommitRecord;
