//! Changelog data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commit classification
///
/// Declaration order is the canonical group order of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Performance improvement
    Perf,
    /// Refactoring
    Refactor,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Tests
    Test,
    /// Build system
    Build,
    /// CI configuration
    Ci,
    /// Chores (maintenance)
    Chore,
    /// Reverting changes
    Revert,
    /// Anything that did not match the grammar
    Other,
}

impl CommitKind {
    /// Every kind in canonical group order
    pub const ORDERED: [CommitKind; 12] = [
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Refactor,
        Self::Docs,
        Self::Style,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Chore,
        Self::Revert,
        Self::Other,
    ];

    /// Position in the canonical group order
    pub fn position(self) -> usize {
        match self {
            Self::Feat => 0,
            Self::Fix => 1,
            Self::Perf => 2,
            Self::Refactor => 3,
            Self::Docs => 4,
            Self::Style => 5,
            Self::Test => 6,
            Self::Build => 7,
            Self::Ci => 8,
            Self::Chore => 9,
            Self::Revert => 10,
            Self::Other => 11,
        }
    }

    /// The grammar token for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
            Self::Other => "other",
        }
    }

    /// Section title used when rendering
    pub fn section_title(self) -> &'static str {
        match self {
            Self::Feat => "Features",
            Self::Fix => "Bug Fixes",
            Self::Perf => "Performance Improvements",
            Self::Refactor => "Code Refactoring",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Test => "Tests",
            Self::Build => "Build System",
            Self::Ci => "Continuous Integration",
            Self::Chore => "Chores",
            Self::Revert => "Reverts",
            Self::Other => "Other Changes",
        }
    }
}

impl std::fmt::Display for CommitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "perf" => Ok(Self::Perf),
            "refactor" => Ok(Self::Refactor),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

/// One classified commit
///
/// Entries are immutable once produced; provenance tagging consumes the
/// value and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Back-reference to the source commit
    pub commit_hash: String,
    /// Classification
    pub kind: CommitKind,
    /// Scope tag from the subject, if any
    pub scope: Option<String>,
    /// Whether this is a breaking change
    pub breaking: bool,
    /// First line, trailer-stripped
    pub summary: String,
    /// Remaining description, trailer block removed
    pub body: Option<String>,
    /// Team attribution resolved from the configured trailer
    pub team: Option<String>,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Project the entry was discovered through
    pub source_project: Option<String>,
    /// Branch the entry was discovered through
    pub source_branch: Option<String>,
}

impl ChangelogEntry {
    /// Tag the entry with the traversal target that discovered it
    pub fn with_provenance(mut self, project: impl Into<String>, branch: impl Into<String>) -> Self {
        self.source_project = Some(project.into());
        self.source_branch = Some(branch.into());
        self
    }

    /// Short form of the commit hash
    pub fn short_hash(&self) -> &str {
        let end = self.commit_hash.len().min(7);
        &self.commit_hash[..end]
    }
}

/// Group key of an assembly section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Commit kind
    pub kind: CommitKind,
    /// Team sub-group, when team grouping is enabled
    pub team: Option<String>,
}

/// One group of the assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Group key
    pub key: GroupKey,
    /// Rendered section title
    pub title: String,
    /// Entries in first-discovery order
    pub entries: Vec<ChangelogEntry>,
}

impl Section {
    /// Create an empty section for a group key
    pub fn new(key: GroupKey) -> Self {
        let title = match &key.team {
            Some(team) => format!("{} ({})", key.kind.section_title(), team),
            None => key.kind.section_title().to_string(),
        };
        Self {
            key,
            title,
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: ChangelogEntry) {
        self.entries.push(entry);
    }

    /// Whether the section holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The grouped, ordered result of an aggregation run
///
/// Sections appear in canonical kind order, team sub-groups by first
/// appearance within their kind, entries by first discovery. Breaking
/// entries are additionally referenced from `breaking_changes`; that
/// presentation-level duplication does not break the one-entry-per-commit
/// invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogAssembly {
    /// Sections in defined order
    pub sections: Vec<Section>,
    /// Every breaking entry, in first-discovery order
    pub breaking_changes: Vec<ChangelogEntry>,
}

impl ChangelogAssembly {
    /// Whether the assembly holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.breaking_changes.is_empty()
    }

    /// Total number of entries across sections
    ///
    /// Breaking entries are not double-counted; they live in a section
    /// like every other entry.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Iterate every entry in section order
    pub fn entries(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("feat".parse::<CommitKind>().unwrap(), CommitKind::Feat);
        assert_eq!("FIX".parse::<CommitKind>().unwrap(), CommitKind::Fix);
        assert!("unknown".parse::<CommitKind>().is_err());
    }

    #[test]
    fn test_canonical_order_matches_positions() {
        for (idx, kind) in CommitKind::ORDERED.iter().enumerate() {
            assert_eq!(kind.position(), idx);
        }
    }

    #[test]
    fn test_section_title_with_team() {
        let section = Section::new(GroupKey {
            kind: CommitKind::Feat,
            team: Some("infra".to_string()),
        });
        assert_eq!(section.title, "Features (infra)");

        let plain = Section::new(GroupKey {
            kind: CommitKind::Fix,
            team: None,
        });
        assert_eq!(plain.title, "Bug Fixes");
    }

    #[test]
    fn test_provenance_tagging() {
        let entry = ChangelogEntry {
            commit_hash: "abc1234567890".to_string(),
            kind: CommitKind::Feat,
            scope: None,
            breaking: false,
            summary: "add widget".to_string(),
            body: None,
            team: None,
            author: "Test".to_string(),
            timestamp: Utc::now(),
            source_project: None,
            source_branch: None,
        };

        let tagged = entry.with_provenance("api", "main");
        assert_eq!(tagged.source_project.as_deref(), Some("api"));
        assert_eq!(tagged.source_branch.as_deref(), Some("main"));
        assert_eq!(tagged.short_hash(), "abc1234");
    }
}
