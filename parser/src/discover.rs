//! Run discovery: locating and loading interaction log files.
//!
//! Discovery is fully explicit: the caller passes the documentation root and
//! the file-name pattern in a [`DiscoverConfig`]. Nothing here consults the
//! working directory, environment variables, or hardcoded paths, so the same
//! configuration always finds the same files.
//!
//! Loading a run is a pure function of the file's bytes plus its filesystem
//! modification time; runs have no ordering dependency on each other, so
//! [`discover_runs`] parses them in parallel and collects results in
//! discovery order.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use interaction_report_core::TestRun;

use crate::report::ParseReport;

/// Typed error for run discovery and loading.
///
/// Only real failures live here: an unreadable file or an unusable pattern.
/// A readable log with zero interactions is a valid empty run, not an error.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure (discovery configuration).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File-name pattern that cannot be compiled.
    #[error("invalid file pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Default documentation directory written by the interaction test harness.
pub const DEFAULT_ROOT_DIR: &str = "results/ai_assistant_documentation";

/// Default file-name pattern for per-run log files.
pub const DEFAULT_FILE_PATTERN: &str = "current_test_*.txt";

/// Where and what to discover.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    /// Directory containing the run log files.
    pub root_dir: PathBuf,
    /// Glob-style file-name pattern (`*` and `?` wildcards).
    pub file_pattern: String,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

/// Translates a glob-style file-name pattern into an anchored regex.
///
/// `*` matches any run of characters, `?` matches one character, everything
/// else is literal.
fn glob_to_regex(pattern: &str) -> Result<Regex, DiscoverError> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|err| DiscoverError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}

/// Lists run files under the configured root matching the configured
/// pattern, sorted by file name for a deterministic discovery order.
pub fn find_run_files(config: &DiscoverConfig) -> Result<Vec<PathBuf>, DiscoverError> {
    let matcher = glob_to_regex(&config.file_pattern)?;
    let mut files = Vec::new();
    for entry in fs::read_dir(&config.root_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if matcher.is_match(&name) {
            files.push(entry.path());
        }
    }
    files.sort();
    debug!(
        root = %config.root_dir.display(),
        pattern = %config.file_pattern,
        count = files.len(),
        "discovered run files"
    );
    Ok(files)
}

/// Loads and parses one run file.
///
/// The whole file is read as one UTF-8 text (logs are bounded, not
/// streamed); recency comes from the filesystem modification time, never
/// from in-log timestamps. I/O failures propagate; data-shape problems do
/// not.
pub fn load_run(path: &Path) -> Result<TestRun, DiscoverError> {
    Ok(load_run_with_report(path)?.0)
}

/// Like [`load_run`], but also returns the parse diagnostics.
pub fn load_run_with_report(path: &Path) -> Result<(TestRun, ParseReport), DiscoverError> {
    let text = fs::read_to_string(path)?;
    let modified_at: DateTime<Utc> = fs::metadata(path)?.modified()?.into();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = crate::parse_log_text_with_report(&name, &text);
    let run = TestRun::new(
        name,
        path.display().to_string(),
        modified_at,
        outcome.interactions,
    );
    debug!(
        run = %run.name,
        interactions = run.interaction_count(),
        dropped = outcome.report.sections_dropped,
        "loaded run"
    );
    Ok((run, outcome.report))
}

/// Discovers and loads all runs for `config`, in discovery order.
///
/// Files are parsed in parallel; each worker owns its file's text and the
/// collected order matches [`find_run_files`]. The first I/O failure aborts
/// the whole discovery so callers never see a silently incomplete history.
pub fn discover_runs(config: &DiscoverConfig) -> Result<Vec<TestRun>, DiscoverError> {
    let files = find_run_files(config)?;
    files
        .par_iter()
        .map(|path| load_run(path))
        .collect::<Result<Vec<_>, _>>()
}

/// Like [`discover_runs`], but pairs every run with its parse report.
pub fn discover_runs_with_reports(
    config: &DiscoverConfig,
) -> Result<Vec<(TestRun, ParseReport)>, DiscoverError> {
    let files = find_run_files(config)?;
    files
        .par_iter()
        .map(|path| load_run_with_report(path))
        .collect::<Result<Vec<_>, _>>()
}
