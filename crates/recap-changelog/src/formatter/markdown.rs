//! Markdown changelog formatter

use tracing::debug;

use super::ChangelogFormatter;
use crate::types::{ChangelogAssembly, ChangelogEntry};
use recap_core::config::RenderConfig;

/// Markdown changelog formatter
#[derive(Debug, Default)]
pub struct MarkdownFormatter {
    /// Repository URL for commit links
    pub repo_url: Option<String>,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set repository URL for commit links
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    fn push_entry(&self, output: &mut String, entry: &ChangelogEntry, config: &RenderConfig) {
        output.push_str("- ");
        if entry.breaking {
            output.push_str("💥 ");
        }
        output.push_str(&entry.summary);

        if let Some(scope) = &entry.scope {
            output.push_str(&format!(" ({})", scope));
        }

        if config.include_hashes {
            let short_hash = entry.short_hash();
            if let Some(repo_url) = &self.repo_url {
                output.push_str(&format!(
                    " ([{}]({}/commit/{}))",
                    short_hash, repo_url, entry.commit_hash
                ));
            } else {
                output.push_str(&format!(" ({})", short_hash));
            }
        }

        if config.include_authors {
            output.push_str(&format!(" - {}", entry.author));
        }

        if config.include_sources {
            if let (Some(project), Some(branch)) = (&entry.source_project, &entry.source_branch) {
                output.push_str(&format!(" [{}/{}]", project, branch));
            }
        }

        output.push('\n');
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn format(&self, assembly: &ChangelogAssembly, config: &RenderConfig) -> String {
        let mut output = String::new();
        output.push_str("# Changelog\n\n");

        if !assembly.breaking_changes.is_empty() {
            output.push_str("### ⚠ BREAKING CHANGES\n\n");
            for entry in &assembly.breaking_changes {
                output.push_str(&format!("- {}", entry.summary));
                if let Some(scope) = &entry.scope {
                    output.push_str(&format!(" ({})", scope));
                }
                if let Some(body) = &entry.body {
                    output.push_str(&format!(" - {}", body.lines().next().unwrap_or("")));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        for section in &assembly.sections {
            if section.is_empty() {
                continue;
            }

            output.push_str(&format!("### {}\n\n", section.title));
            for entry in &section.entries {
                self.push_entry(&mut output, entry, config);
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitKind, GroupKey, Section};
    use chrono::Utc;

    fn entry(kind: CommitKind, summary: &str) -> ChangelogEntry {
        ChangelogEntry {
            commit_hash: "abc1234567890".to_string(),
            kind,
            scope: None,
            breaking: false,
            summary: summary.to_string(),
            body: None,
            team: None,
            author: "Test".to_string(),
            timestamp: Utc::now(),
            source_project: Some("api".to_string()),
            source_branch: Some("main".to_string()),
        }
    }

    fn assembly_with(entries: Vec<ChangelogEntry>) -> ChangelogAssembly {
        let mut section = Section::new(GroupKey {
            kind: entries[0].kind,
            team: None,
        });
        let breaking: Vec<ChangelogEntry> =
            entries.iter().filter(|e| e.breaking).cloned().collect();
        for e in entries {
            section.push(e);
        }
        ChangelogAssembly {
            sections: vec![section],
            breaking_changes: breaking,
        }
    }

    #[test]
    fn test_format_basic() {
        let formatter = MarkdownFormatter::new();
        let config = RenderConfig::default();
        let assembly = assembly_with(vec![entry(CommitKind::Feat, "add new feature")]);

        let output = formatter.format(&assembly, &config);

        assert!(output.contains("# Changelog"));
        assert!(output.contains("### Features"));
        assert!(output.contains("add new feature"));
        assert!(output.contains("(abc1234)"));
    }

    #[test]
    fn test_format_with_scope_and_author() {
        let formatter = MarkdownFormatter::new();
        let config = RenderConfig {
            include_authors: true,
            ..RenderConfig::default()
        };

        let mut e = entry(CommitKind::Fix, "handle edge case");
        e.scope = Some("parser".to_string());
        let output = formatter.format(&assembly_with(vec![e]), &config);

        assert!(output.contains("(parser)"));
        assert!(output.contains("- Test"));
    }

    #[test]
    fn test_format_breaking_changes_listed_twice() {
        let formatter = MarkdownFormatter::new();
        let config = RenderConfig::default();

        let mut e = entry(CommitKind::Feat, "remove deprecated API");
        e.breaking = true;
        let output = formatter.format(&assembly_with(vec![e]), &config);

        assert!(output.contains("BREAKING CHANGES"));
        // Once in the breaking block, once (marked) in its section.
        assert_eq!(output.matches("remove deprecated API").count(), 2);
        assert!(output.contains("💥 remove deprecated API"));
    }

    #[test]
    fn test_format_with_sources() {
        let formatter = MarkdownFormatter::new();
        let config = RenderConfig {
            include_sources: true,
            ..RenderConfig::default()
        };

        let output = formatter.format(&assembly_with(vec![entry(CommitKind::Docs, "x")]), &config);
        assert!(output.contains("[api/main]"));
    }

    #[test]
    fn test_format_with_repo_url() {
        let formatter = MarkdownFormatter::new().with_repo_url("https://github.com/test/repo");
        let config = RenderConfig::default();

        let output = formatter.format(&assembly_with(vec![entry(CommitKind::Feat, "x")]), &config);
        assert!(output.contains("https://github.com/test/repo/commit/abc1234567890"));
    }
}
