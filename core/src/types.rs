//! Data model for parsed interaction test runs.
//!
//! This module defines the record types produced by the log parser and
//! consumed read-only by report renderers. The types are designed for
//! serialization with [`serde`] and round-trip through JSON and YAML.
//!
//! Absent fields are always explicit: string fields carry the
//! [`NOT_AVAILABLE`] sentinel and numeric fields are `None`. A value that
//! looks like real data is never fabricated for a field the source text did
//! not contain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the record contract (semver).
///
/// Embedded in every [`TestRun`] so renderers can detect incompatible
/// producer versions instead of misreading fields.
pub const RECORD_CONTRACT_VERSION: &str = "1.0.0";

/// Sentinel for string fields absent from the source text.
pub const NOT_AVAILABLE: &str = "N/A";

/// Length/word-count classification of an AI response.
///
/// `Long` wins on *either* threshold, `Medium` requires *both* of its
/// thresholds; see [`classify`](crate::classify::classify) for the exact
/// rules and tie-break ordering.
///
/// # Examples
///
/// ```
/// use interaction_report_core::ResponseCategory;
///
/// assert_eq!(ResponseCategory::from_label("LONG"), ResponseCategory::Long);
/// assert_eq!(ResponseCategory::from_label("medium"), ResponseCategory::Medium);
/// assert_eq!(ResponseCategory::from_label("N/A"), ResponseCategory::Unknown);
/// assert_eq!(ResponseCategory::default(), ResponseCategory::Unknown);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseCategory {
    /// Response exceeding either the length or the word-count threshold.
    Long,
    /// Response meeting both mid-range thresholds without qualifying as long.
    Medium,
    /// Response below the mid-range thresholds.
    Short,
    /// No usable label or counts in the source text (the default).
    #[default]
    Unknown,
}

impl ResponseCategory {
    /// Parses a logged category label, case-insensitively.
    ///
    /// Unrecognized labels (including the `"N/A"` sentinel) map to
    /// [`ResponseCategory::Unknown`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("long") {
            Self::Long
        } else if label.eq_ignore_ascii_case("medium") {
            Self::Medium
        } else if label.eq_ignore_ascii_case("short") {
            Self::Short
        } else {
            Self::Unknown
        }
    }

    /// Returns the canonical uppercase label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Medium => "MEDIUM",
            Self::Short => "SHORT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the question submitted to the assistant ended with a question mark.
///
/// # Examples
///
/// ```
/// use interaction_report_core::QuestionMark;
///
/// assert_eq!(QuestionMark::from_label("Yes"), QuestionMark::Yes);
/// assert_eq!(QuestionMark::from_label("no"), QuestionMark::No);
/// assert_eq!(QuestionMark::from_label("N/A"), QuestionMark::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionMark {
    Yes,
    No,
    /// Field missing from the source text (the default).
    #[default]
    Unknown,
}

impl QuestionMark {
    /// Parses a logged yes/no label, case-insensitively; anything else is
    /// [`QuestionMark::Unknown`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("yes") {
            Self::Yes
        } else if label.eq_ignore_ascii_case("no") {
            Self::No
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for QuestionMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => f.write_str("YES"),
            Self::No => f.write_str("NO"),
            Self::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// One parsed question/answer exchange with its logged metrics.
///
/// Every field is independently optional in the source text. `timestamp`,
/// `question`, `answer`, `raw_category`, and the screenshot references carry
/// [`NOT_AVAILABLE`] when missing; the numeric metrics are `None`.
///
/// `category` is parsed from the logged label; `raw_category` preserves the
/// label exactly as written so that discrepancies between the logged and the
/// derived classification can be surfaced without losing the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Timestamp as logged; opaque, never reparsed into a calendar type.
    pub timestamp: String,
    /// Question text submitted to the assistant.
    pub question: String,
    /// Assistant response text.
    pub answer: String,
    /// Category parsed from the logged label.
    pub category: ResponseCategory,
    /// Logged category label, verbatim.
    pub raw_category: String,
    /// Response length in characters, when logged.
    pub length: Option<u64>,
    /// Response word count, when logged.
    pub word_count: Option<u64>,
    /// Logged quality score in `[0, 100]`, when present.
    pub quality_score: Option<f64>,
    /// Whether the question ended with a question mark.
    pub has_question_mark: QuestionMark,
    /// Opaque path to the question screenshot; never dereferenced here.
    pub question_screenshot: String,
    /// Opaque path to the response screenshot; never dereferenced here.
    pub answer_screenshot: String,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            timestamp: NOT_AVAILABLE.to_string(),
            question: NOT_AVAILABLE.to_string(),
            answer: NOT_AVAILABLE.to_string(),
            category: ResponseCategory::Unknown,
            raw_category: NOT_AVAILABLE.to_string(),
            length: None,
            word_count: None,
            quality_score: None,
            has_question_mark: QuestionMark::Unknown,
            question_screenshot: NOT_AVAILABLE.to_string(),
            answer_screenshot: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One log file's worth of interactions, in source order.
///
/// The interaction sequence is never reordered after parsing: position in
/// `interactions` is the interaction's sequence number within the test run.
/// Derived orderings (e.g. history by recency) are computed by consumers,
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    /// Record contract version, for renderer compatibility checks.
    pub contract_version: String,
    /// Run identifier, typically the source file name.
    pub name: String,
    /// Path the run was read from.
    pub source_path: String,
    /// Filesystem modification time of the source file; recency is taken
    /// from here, not from any in-log timestamp.
    pub modified_at: DateTime<Utc>,
    /// Parsed interactions in order of appearance.
    pub interactions: Vec<Interaction>,
}

impl TestRun {
    /// Creates a run stamped with the current [`RECORD_CONTRACT_VERSION`].
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<String>,
        modified_at: DateTime<Utc>,
        interactions: Vec<Interaction>,
    ) -> Self {
        Self {
            contract_version: RECORD_CONTRACT_VERSION.to_string(),
            name: name.into(),
            source_path: source_path.into(),
            modified_at,
            interactions,
        }
    }

    /// Number of interactions parsed from the run.
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }
}
