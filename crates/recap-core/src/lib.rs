//! Recap Core - shared types, configuration and errors
//!
//! This crate provides the error taxonomy, the project configuration
//! system and the snapshot history used by the recap changelog tool.

pub mod config;
pub mod error;
pub mod snapshot;

pub use error::{AggregateError, AggregateWarning, ConfigError, GitError, SnapshotError};
pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotHistory};
