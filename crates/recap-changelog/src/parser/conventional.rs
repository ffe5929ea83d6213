//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use std::sync::LazyLock;

use regex::Regex;

use super::{CommitParser, ParserConfig};
use crate::trailer::split_message;
use crate::types::{ChangelogEntry, CommitKind};
use recap_git::CommitRecord;

/// Regex for the `type[(scope)][!]: description` subject grammar
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("invalid subject regex")
});

/// Parser for Conventional Commits format
///
/// Classification is total: any record yields an entry, the fallback
/// kind being `other` with the whole subject as summary.
pub struct ConventionalParser {
    config: ParserConfig,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Subject classification before trailers are applied
struct ParsedSubject {
    kind: CommitKind,
    scope: Option<String>,
    breaking: bool,
    summary: String,
}

/// Classify a subject line
///
/// The revert rule runs before the grammar: git's own `Revert "..."`
/// subjects carry the reverted subject in quotes, and the quoted text
/// must not win.
fn classify_subject(subject: &str) -> ParsedSubject {
    if subject == "Revert" || subject.starts_with("Revert ") {
        return ParsedSubject {
            kind: CommitKind::Revert,
            scope: None,
            breaking: false,
            summary: subject.to_string(),
        };
    }

    if let Some(caps) = CONVENTIONAL_REGEX.captures(subject) {
        if let Ok(kind) = caps["type"].to_lowercase().parse::<CommitKind>() {
            return ParsedSubject {
                kind,
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                breaking: caps.name("breaking").is_some(),
                summary: caps["description"].trim().to_string(),
            };
        }
    }

    ParsedSubject {
        kind: CommitKind::Other,
        scope: None,
        breaking: false,
        summary: subject.to_string(),
    }
}

fn is_breaking_token(token: &str) -> bool {
    token.eq_ignore_ascii_case("BREAKING CHANGE") || token.eq_ignore_ascii_case("BREAKING-CHANGE")
}

impl CommitParser for ConventionalParser {
    fn parse(&self, record: &CommitRecord) -> ChangelogEntry {
        let parts = split_message(&record.message);
        let subject = classify_subject(&parts.subject);

        let breaking_texts: Vec<&str> = parts
            .trailers
            .iter()
            .filter(|(token, _)| is_breaking_token(token))
            .map(|(_, value)| value)
            .collect();

        let breaking = subject.breaking || !breaking_texts.is_empty();

        let body = parts.body.or_else(|| {
            let joined = breaking_texts.join("\n");
            (!joined.is_empty()).then_some(joined)
        });

        let team = parts
            .trailers
            .last(&self.config.team_trailer)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ChangelogEntry {
            commit_hash: record.hash.clone(),
            kind: subject.kind,
            scope: subject.scope,
            breaking,
            summary: subject.summary,
            body,
            team,
            author: record.author.clone(),
            timestamp: record.timestamp,
            source_project: None,
            source_branch: None,
        }
    }

    fn should_include(&self, entry: &ChangelogEntry) -> bool {
        if self.config.exclude_kinds.contains(&entry.kind) {
            return false;
        }

        // Empty include set means everything not excluded.
        self.config.include_kinds.is_empty() || self.config.include_kinds.contains(&entry.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_record(message: &str) -> CommitRecord {
        CommitRecord::new(
            "abc1234567890",
            message,
            "Test Author",
            "test@example.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_parse_simple_feat() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("feat: add new feature"));

        assert_eq!(entry.kind, CommitKind::Feat);
        assert_eq!(entry.summary, "add new feature");
        assert!(entry.scope.is_none());
        assert!(!entry.breaking);
        assert_eq!(entry.commit_hash, "abc1234567890");
    }

    #[test]
    fn test_parse_with_scope() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("fix(parser): handle edge case"));

        assert_eq!(entry.kind, CommitKind::Fix);
        assert_eq!(entry.scope.as_deref(), Some("parser"));
        assert_eq!(entry.summary, "handle edge case");
    }

    #[test]
    fn test_breaking_marker_with_scope() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("feat(api)!: change signature"));

        assert_eq!(entry.kind, CommitKind::Feat);
        assert_eq!(entry.scope.as_deref(), Some("api"));
        assert!(entry.breaking);
    }

    #[test]
    fn test_breaking_trailer_fills_body() {
        let parser = ConventionalParser::new();
        let entry =
            parser.parse(&make_record("fix: typo\n\nBREAKING CHANGE: removes endpoint"));

        assert_eq!(entry.kind, CommitKind::Fix);
        assert!(entry.breaking);
        assert_eq!(entry.body.as_deref(), Some("removes endpoint"));
    }

    #[test]
    fn test_breaking_trailer_keeps_existing_body() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record(
            "feat: x\n\nexisting body\n\nBREAKING-CHANGE: gone",
        ));

        assert!(entry.breaking);
        assert_eq!(entry.body.as_deref(), Some("existing body"));
    }

    #[test]
    fn test_team_last_wins() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("feat: x\n\nteam: backend\nteam: infra"));

        assert_eq!(entry.team.as_deref(), Some("infra"));
    }

    #[test]
    fn test_team_token_is_configurable() {
        let parser =
            ConventionalParser::with_config(ParserConfig::default().with_team_trailer("squad"));
        let entry = parser.parse(&make_record("feat: x\n\nsquad: platform\nteam: ignored"));

        assert_eq!(entry.team.as_deref(), Some("platform"));
    }

    #[test]
    fn test_fallback_to_other() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("update stuff"));

        assert_eq!(entry.kind, CommitKind::Other);
        assert!(entry.scope.is_none());
        assert_eq!(entry.summary, "update stuff");
    }

    #[test]
    fn test_unrecognized_type_token_falls_back() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("wip: half done"));

        assert_eq!(entry.kind, CommitKind::Other);
        assert_eq!(entry.summary, "wip: half done");
    }

    #[test]
    fn test_revert_priority_over_quoted_type() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("Revert \"feat: add widget\""));

        assert_eq!(entry.kind, CommitKind::Revert);
        assert_eq!(entry.summary, "Revert \"feat: add widget\"");
    }

    #[test]
    fn test_revert_is_case_sensitive() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("revert widget change"));

        assert_eq!(entry.kind, CommitKind::Other);
    }

    #[test]
    fn test_trailer_only_message() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("\n\nteam: backend"));

        assert_eq!(entry.kind, CommitKind::Other);
        assert_eq!(entry.summary, "");
        assert_eq!(entry.team.as_deref(), Some("backend"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = ConventionalParser::new();
        let record = make_record("feat(api)!: change signature\n\nbody\n\nteam: infra");

        assert_eq!(parser.parse(&record), parser.parse(&record));
    }

    #[test]
    fn test_should_include_with_excludes() {
        let parser = ConventionalParser::with_config(
            ParserConfig::default().exclude_kind(CommitKind::Chore),
        );

        let feature = parser.parse(&make_record("feat: feature"));
        assert!(parser.should_include(&feature));

        let chore = parser.parse(&make_record("chore: cleanup"));
        assert!(!parser.should_include(&chore));
    }

    #[test]
    fn test_should_include_with_include_list() {
        let parser = ConventionalParser::with_config(
            ParserConfig::default()
                .include_kind(CommitKind::Feat)
                .include_kind(CommitKind::Fix),
        );

        assert!(parser.should_include(&parser.parse(&make_record("fix: bug"))));
        assert!(!parser.should_include(&parser.parse(&make_record("docs: readme"))));
    }

    #[test]
    fn test_should_include_defaults_to_everything() {
        let parser = ConventionalParser::new();
        let entry = parser.parse(&make_record("Merge branch 'develop'"));
        assert!(parser.should_include(&entry));
    }
}
