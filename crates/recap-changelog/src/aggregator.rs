//! Aggregation across traversal targets
//!
//! The aggregator drives one walker per (project, branch) target, feeds
//! every yielded record through the parser, and groups the entries for
//! rendering. One visited set is threaded through the whole run, so a
//! commit reachable from several targets contributes exactly one entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use recap_core::error::{AggregateError, AggregateWarning};
use recap_git::CommitSource;

use crate::parser::{CommitParser, ConventionalParser};
use crate::types::{ChangelogAssembly, ChangelogEntry, GroupKey, Section};
use crate::walker::{HistoryWalker, VisitedSet};

/// One (project, branch) pair to walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalTarget {
    /// Project name routing the resolve call
    pub project: String,
    /// Branch to resolve to a start commit
    pub branch: String,
}

impl TraversalTarget {
    /// Create a new target
    pub fn new(project: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            branch: branch.into(),
        }
    }
}

/// Shared cancellation signal
///
/// Cancelling stops the aggregator from issuing new per-target work; the
/// run returns whatever has been assembled so far. Clones share the flag,
/// so it can be set from another thread or a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A finished run: the assembly plus every accumulated warning
#[derive(Debug)]
pub struct Aggregation {
    /// The grouped, ordered changelog
    pub assembly: ChangelogAssembly,
    /// Non-fatal conditions hit during the run
    pub warnings: Vec<AggregateWarning>,
}

/// Aggregates commit history across traversal targets
pub struct Aggregator {
    parser: Box<dyn CommitParser>,
    group_by_team: bool,
    stop_hashes: Vec<String>,
    cancel: CancelFlag,
}

impl Aggregator {
    /// Create an aggregator with the default conventional parser
    pub fn new() -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            group_by_team: false,
            stop_hashes: Vec::new(),
            cancel: CancelFlag::new(),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Sub-group sections by team attribution
    pub fn with_team_groups(mut self, enabled: bool) -> Self {
        self.group_by_team = enabled;
        self
    }

    /// Seed the visited set so traversal stops at the given hashes
    pub fn with_stop_hashes(mut self, hashes: Vec<String>) -> Self {
        self.stop_hashes = hashes;
        self
    }

    /// Observe an external cancellation flag
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Walk every target in input order and assemble the changelog
    ///
    /// Per-target resolve failures become warnings and the run continues;
    /// the only fatal outcome is every configured target failing.
    #[instrument(skip(self, source, targets), fields(target_count = targets.len()))]
    pub fn aggregate<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        targets: &[TraversalTarget],
    ) -> Result<Aggregation, AggregateError> {
        let mut visited = VisitedSet::seeded(self.stop_hashes.iter().cloned());
        let mut warnings = Vec::new();
        let mut entries: Vec<ChangelogEntry> = Vec::new();
        let mut failed_targets = 0usize;

        for target in targets {
            if self.cancel.is_cancelled() {
                warn!("aggregation cancelled, returning partial assembly");
                break;
            }

            let start = match source.resolve(&target.project, &target.branch) {
                Ok(start) => start,
                Err(err) => {
                    warn!(
                        project = %target.project,
                        branch = %target.branch,
                        %err,
                        "skipping unresolvable target"
                    );
                    warnings.push(AggregateWarning::UnresolvableTarget {
                        project: target.project.clone(),
                        branch: target.branch.clone(),
                        reason: err.to_string(),
                    });
                    failed_targets += 1;
                    continue;
                }
            };

            let before = entries.len();
            let walker = HistoryWalker::new(source, start, &mut visited, &mut warnings);
            for record in walker {
                let entry = self
                    .parser
                    .parse(&record)
                    .with_provenance(&target.project, &target.branch);
                if self.parser.should_include(&entry) {
                    entries.push(entry);
                }
            }

            debug!(
                project = %target.project,
                branch = %target.branch,
                new_entries = entries.len() - before,
                "target walked"
            );
        }

        if !targets.is_empty() && failed_targets == targets.len() {
            return Err(AggregateError::AllTargetsFailed {
                count: failed_targets,
            });
        }

        let assembly = self.group(entries);
        info!(
            sections = assembly.sections.len(),
            entries = assembly.entry_count(),
            breaking = assembly.breaking_changes.len(),
            warnings = warnings.len(),
            "aggregation finished"
        );

        Ok(Aggregation { assembly, warnings })
    }

    /// Group entries into the assembly
    ///
    /// Stable: sections in canonical kind order, team sub-groups and
    /// entries in first-seen order. Breaking entries are referenced from
    /// the breaking list on top of their regular section.
    fn group(&self, entries: Vec<ChangelogEntry>) -> ChangelogAssembly {
        let mut sections: Vec<Section> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut breaking_changes = Vec::new();

        for entry in entries {
            if entry.breaking {
                breaking_changes.push(entry.clone());
            }

            let key = GroupKey {
                kind: entry.kind,
                team: if self.group_by_team {
                    entry.team.clone()
                } else {
                    None
                },
            };

            let idx = *index.entry(key.clone()).or_insert_with(|| {
                sections.push(Section::new(key));
                sections.len() - 1
            });
            sections[idx].push(entry);
        }

        sections.sort_by_key(|section| section.key.kind.position());

        ChangelogAssembly {
            sections,
            breaking_changes,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
