//! Response classification and quality scoring.
//!
//! The classifier is a total, deterministic function over the logged length
//! and word count. It exists both to derive a category when the log omits
//! one and to cross-check the label the log producer wrote. On disagreement
//! the logged value is never overridden; a [`Discrepancy`] is surfaced and
//! the consumer decides which side to trust.
//!
//! Ordering matters: the `Long` check runs before the `Medium` check and
//! wins on *either* of its thresholds. A response with `length = 300` and
//! `word_count = 10` is `Long`, even though the word count alone would
//! suggest `Short`.

use serde::{Deserialize, Serialize};

use crate::types::{Interaction, ResponseCategory};

/// Character count above which a response is `Long`.
pub const LONG_LENGTH_THRESHOLD: u64 = 250;
/// Word count above which a response is `Long`.
pub const LONG_WORD_THRESHOLD: u64 = 50;
/// Minimum character count for `Medium`.
pub const MEDIUM_LENGTH_THRESHOLD: u64 = 100;
/// Minimum word count for `Medium`.
pub const MEDIUM_WORD_THRESHOLD: u64 = 20;

/// Classifies a response from its character and word counts.
///
/// Rules, applied in order:
///
/// 1. `Long` if `length > 250` **or** `word_count > 50`;
/// 2. `Medium` if `length >= 100` **and** `word_count >= 20`;
/// 3. `Short` otherwise, as long as at least one count is known;
/// 4. `Unknown` when both counts are missing.
///
/// A missing count never satisfies a threshold.
///
/// # Examples
///
/// ```
/// use interaction_report_core::classify::classify;
/// use interaction_report_core::ResponseCategory;
///
/// assert_eq!(classify(Some(300), Some(10)), ResponseCategory::Long);
/// assert_eq!(classify(Some(150), Some(25)), ResponseCategory::Medium);
/// assert_eq!(classify(Some(50), Some(5)), ResponseCategory::Short);
/// assert_eq!(classify(None, None), ResponseCategory::Unknown);
/// ```
pub fn classify(length: Option<u64>, word_count: Option<u64>) -> ResponseCategory {
    if length.is_none() && word_count.is_none() {
        return ResponseCategory::Unknown;
    }
    if length.is_some_and(|chars| chars > LONG_LENGTH_THRESHOLD)
        || word_count.is_some_and(|words| words > LONG_WORD_THRESHOLD)
    {
        return ResponseCategory::Long;
    }
    if length.is_some_and(|chars| chars >= MEDIUM_LENGTH_THRESHOLD)
        && word_count.is_some_and(|words| words >= MEDIUM_WORD_THRESHOLD)
    {
        return ResponseCategory::Medium;
    }
    ResponseCategory::Short
}

/// Quality score derived from response length.
///
/// `min(100, length / 250 * 100)` — proportional to length relative to the
/// `Long` character threshold, capped at 100. `None` when the length is
/// unknown, never a stand-in zero.
///
/// # Examples
///
/// ```
/// use interaction_report_core::classify::quality_score;
///
/// assert_eq!(quality_score(Some(500)), Some(100.0));
/// assert_eq!(quality_score(Some(125)), Some(50.0));
/// assert_eq!(quality_score(Some(0)), Some(0.0));
/// assert_eq!(quality_score(None), None);
/// ```
pub fn quality_score(length: Option<u64>) -> Option<f64> {
    length.map(|chars| (chars as f64 / LONG_LENGTH_THRESHOLD as f64 * 100.0).min(100.0))
}

/// Logged quality scores are printed with at most two decimals; differences
/// below this are formatting noise, not disagreement.
const QUALITY_TOLERANCE: f64 = 0.05;

/// A disagreement between a logged value and the value derived from the
/// logged counts. Both sides are preserved; neither wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Logged category label disagrees with the derived classification.
    Category {
        logged: ResponseCategory,
        derived: ResponseCategory,
    },
    /// Logged quality score disagrees with the score recomputed from length.
    QualityScore { logged: f64, derived: f64 },
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category { logged, derived } => {
                write!(f, "logged category {logged} but counts derive {derived}")
            }
            Self::QualityScore { logged, derived } => {
                write!(f, "logged quality {logged:.2}% but length derives {derived:.2}%")
            }
        }
    }
}

/// Cross-checks an interaction's logged category and quality score against
/// the values derived from its counts.
///
/// Only fields present on both sides are compared: an interaction whose log
/// carried no category label (or no counts) produces no category
/// discrepancy. The interaction itself is never modified.
pub fn check(interaction: &Interaction) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    let derived = classify(interaction.length, interaction.word_count);
    if interaction.category != ResponseCategory::Unknown
        && derived != ResponseCategory::Unknown
        && interaction.category != derived
    {
        discrepancies.push(Discrepancy::Category {
            logged: interaction.category,
            derived,
        });
    }

    if let (Some(logged), Some(derived)) =
        (interaction.quality_score, quality_score(interaction.length))
    {
        if (logged - derived).abs() > QUALITY_TOLERANCE {
            discrepancies.push(Discrepancy::QualityScore { logged, derived });
        }
    }

    discrepancies
}
