//! Parser configuration

use std::collections::HashSet;

use crate::types::CommitKind;

/// Configuration for the commit parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Trailer token resolved into team attribution
    pub team_trailer: String,
    /// Kinds to include; empty means everything not excluded
    pub include_kinds: HashSet<CommitKind>,
    /// Kinds to exclude
    pub exclude_kinds: HashSet<CommitKind>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            team_trailer: "team".to_string(),
            include_kinds: HashSet::new(),
            exclude_kinds: HashSet::new(),
        }
    }
}

impl ParserConfig {
    /// Use a different trailer token for team attribution
    pub fn with_team_trailer(mut self, token: impl Into<String>) -> Self {
        self.team_trailer = token.into();
        self
    }

    /// Add a kind to include
    pub fn include_kind(mut self, kind: CommitKind) -> Self {
        self.include_kinds.insert(kind);
        self
    }

    /// Add a kind to exclude
    pub fn exclude_kind(mut self, kind: CommitKind) -> Self {
        self.exclude_kinds.insert(kind);
        self
    }
}
