//! Cross-run history: recency ordering and lookup by run name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::RunStatistics;
use crate::types::TestRun;

/// Summary of one run paired with its statistics, as shown in history views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub source_path: String,
    pub modified_at: DateTime<Utc>,
    pub interaction_count: usize,
    pub statistics: RunStatistics,
}

/// Recency-ordered view over a set of test runs.
///
/// The index owns its runs in original discovery order and exposes a
/// separate entry sequence sorted by modification time, most recent first.
/// Runs sharing a `modified_at` keep their input order (stable sort).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use interaction_report_core::{HistoryIndex, TestRun};
///
/// let runs = vec![
///     TestRun::new("a", "/logs/a", Utc.timestamp_opt(10, 0).unwrap(), Vec::new()),
///     TestRun::new("b", "/logs/b", Utc.timestamp_opt(30, 0).unwrap(), Vec::new()),
///     TestRun::new("c", "/logs/c", Utc.timestamp_opt(20, 0).unwrap(), Vec::new()),
/// ];
/// let index = HistoryIndex::build(runs);
/// let order: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(order, ["b", "c", "a"]);
/// assert!(index.lookup("c").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryIndex {
    runs: Vec<TestRun>,
    entries: Vec<HistoryEntry>,
}

impl HistoryIndex {
    /// Builds the index, computing statistics for every run.
    pub fn build(runs: Vec<TestRun>) -> Self {
        let mut entries: Vec<HistoryEntry> = runs
            .iter()
            .map(|run| HistoryEntry {
                name: run.name.clone(),
                source_path: run.source_path.clone(),
                modified_at: run.modified_at,
                interaction_count: run.interaction_count(),
                statistics: RunStatistics::compute(run),
            })
            .collect();
        // sort_by is stable, so equal timestamps keep discovery order.
        entries.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Self { runs, entries }
    }

    /// History entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The runs in their original discovery order.
    pub fn runs(&self) -> &[TestRun] {
        &self.runs
    }

    /// The most recent run, if any.
    pub fn latest(&self) -> Option<&TestRun> {
        let entry = self.entries.first()?;
        self.lookup_path(&entry.source_path)
    }

    /// Finds a run by exact name, scanning in original discovery order.
    ///
    /// Duplicate names are permitted and resolve to the first match; callers
    /// that care should consult [`duplicate_names`](Self::duplicate_names).
    pub fn lookup(&self, name: &str) -> Option<&TestRun> {
        self.runs.iter().find(|run| run.name == name)
    }

    /// Run names that appear more than once, in first-appearance order.
    ///
    /// Lookup on such a name silently resolves to the first match, so
    /// consumers are expected to surface these rather than merge them.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut duplicates = Vec::new();
        for (i, run) in self.runs.iter().enumerate() {
            let first = self.runs.iter().position(|r| r.name == run.name);
            if first == Some(i) && self.runs[i + 1..].iter().any(|r| r.name == run.name) {
                duplicates.push(run.name.clone());
            }
        }
        duplicates
    }

    fn lookup_path(&self, source_path: &str) -> Option<&TestRun> {
        self.runs.iter().find(|run| run.source_path == source_path)
    }
}
