//! Per-run statistics derived from a test run's interactions.
//!
//! Statistics are a pure view: they are recomputed on demand from the run
//! and never cached or mutated in place. Averages over an empty or
//! all-unknown population are `0.0` by contract; extremes are `None`, which
//! serializes as `null` and stays distinguishable from a real zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{QuestionMark, ResponseCategory, TestRun};

/// Extremes of the known quality scores in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityExtremes {
    pub max: f64,
    pub min: f64,
    /// `max - min`.
    pub range: f64,
}

/// Aggregates restricted to one category's interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Interactions carrying this category.
    pub count: usize,
    /// Mean quality over this category's known scores; `0.0` if none known.
    pub average_quality: f64,
    /// Mean length over this category's known lengths; `0.0` if none known.
    pub average_length: f64,
}

/// Statistics over one test run, recomputed on demand.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use interaction_report_core::{Interaction, RunStatistics, TestRun};
///
/// let run = TestRun::new("empty", "/dev/null", Utc::now(), Vec::new());
/// let stats = RunStatistics::compute(&run);
/// assert_eq!(stats.average_quality, 0.0);
/// assert!(stats.quality_extremes.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Total interactions in the run, regardless of field completeness.
    pub interaction_count: usize,
    /// Mean of known quality scores; `0.0` when none are known.
    pub average_quality: f64,
    /// Mean of known response lengths; `0.0` when none are known.
    pub average_length: f64,
    /// Mean of known word counts; `0.0` when none are known.
    pub average_word_count: f64,
    /// Interactions per category, including `UNKNOWN`.
    pub category_distribution: BTreeMap<ResponseCategory, usize>,
    /// Interactions whose question ended with a question mark.
    pub question_mark_yes: usize,
    /// Quality extremes; `None` (serialized as `null`) when no interaction
    /// carries a known quality score.
    pub quality_extremes: Option<QualityExtremes>,
    /// Sub-statistics for each category present in the run.
    pub per_category: BTreeMap<ResponseCategory, CategoryStats>,
}

impl RunStatistics {
    /// Computes statistics from a run's interactions.
    pub fn compute(run: &TestRun) -> Self {
        let interactions = &run.interactions;

        let average_quality = mean(interactions.iter().filter_map(|i| i.quality_score));
        let average_length = mean(interactions.iter().filter_map(|i| i.length.map(|v| v as f64)));
        let average_word_count =
            mean(interactions.iter().filter_map(|i| i.word_count.map(|v| v as f64)));

        let mut category_distribution: BTreeMap<ResponseCategory, usize> = BTreeMap::new();
        for interaction in interactions {
            *category_distribution.entry(interaction.category).or_default() += 1;
        }

        let question_mark_yes = interactions
            .iter()
            .filter(|i| i.has_question_mark == QuestionMark::Yes)
            .count();

        let quality_extremes = extremes(interactions.iter().filter_map(|i| i.quality_score));

        let mut per_category = BTreeMap::new();
        for &category in category_distribution.keys() {
            let members = || interactions.iter().filter(move |i| i.category == category);
            per_category.insert(
                category,
                CategoryStats {
                    count: members().count(),
                    average_quality: mean(members().filter_map(|i| i.quality_score)),
                    average_length: mean(members().filter_map(|i| i.length.map(|v| v as f64))),
                },
            );
        }

        Self {
            interaction_count: interactions.len(),
            average_quality,
            average_length,
            average_word_count,
            category_distribution,
            question_mark_yes,
            quality_extremes,
            per_category,
        }
    }
}

/// Arithmetic mean, defined as `0.0` over an empty population.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn extremes(values: impl Iterator<Item = f64>) -> Option<QualityExtremes> {
    let mut max: Option<f64> = None;
    let mut min: Option<f64> = None;
    for value in values {
        max = Some(max.map_or(value, |m| m.max(value)));
        min = Some(min.map_or(value, |m| m.min(value)));
    }
    match (max, min) {
        (Some(max), Some(min)) => Some(QualityExtremes {
            max,
            min,
            range: max - min,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interaction;
    use chrono::Utc;

    fn run_of(interactions: Vec<Interaction>) -> TestRun {
        TestRun::new("test", "/tmp/test.txt", Utc::now(), interactions)
    }

    fn interaction(
        category: ResponseCategory,
        length: Option<u64>,
        word_count: Option<u64>,
        quality: Option<f64>,
    ) -> Interaction {
        Interaction {
            category,
            raw_category: category.as_str().to_string(),
            length,
            word_count,
            quality_score: quality,
            ..Interaction::default()
        }
    }

    #[test]
    fn test_empty_run_yields_neutral_statistics() {
        let stats = RunStatistics::compute(&run_of(Vec::new()));
        assert_eq!(stats.interaction_count, 0);
        assert_eq!(stats.average_quality, 0.0);
        assert_eq!(stats.average_length, 0.0);
        assert_eq!(stats.average_word_count, 0.0);
        assert_eq!(stats.question_mark_yes, 0);
        assert!(stats.quality_extremes.is_none());
        assert!(stats.category_distribution.is_empty());
        assert!(stats.per_category.is_empty());
    }

    #[test]
    fn test_all_unknown_metrics_yield_zero_means_and_no_extremes() {
        let stats = RunStatistics::compute(&run_of(vec![
            Interaction::default(),
            Interaction::default(),
        ]));
        assert_eq!(stats.interaction_count, 2);
        assert_eq!(stats.average_quality, 0.0);
        assert!(stats.quality_extremes.is_none());
        // Unknown is still counted in the distribution.
        assert_eq!(
            stats.category_distribution.get(&ResponseCategory::Unknown),
            Some(&2)
        );
    }

    #[test]
    fn test_means_skip_unknown_values() {
        let stats = RunStatistics::compute(&run_of(vec![
            interaction(ResponseCategory::Long, Some(300), Some(60), Some(100.0)),
            interaction(ResponseCategory::Short, Some(100), None, Some(40.0)),
            interaction(ResponseCategory::Unknown, None, Some(30), None),
        ]));
        assert_eq!(stats.average_quality, 70.0);
        assert_eq!(stats.average_length, 200.0);
        assert_eq!(stats.average_word_count, 45.0);
    }

    #[test]
    fn test_extremes_and_range() {
        let stats = RunStatistics::compute(&run_of(vec![
            interaction(ResponseCategory::Long, Some(300), Some(60), Some(100.0)),
            interaction(ResponseCategory::Short, Some(50), Some(5), Some(20.0)),
            interaction(ResponseCategory::Medium, Some(150), Some(25), Some(60.0)),
        ]));
        let extremes = stats.quality_extremes.expect("known scores present");
        assert_eq!(extremes.max, 100.0);
        assert_eq!(extremes.min, 20.0);
        assert_eq!(extremes.range, 80.0);
    }

    #[test]
    fn test_question_mark_count() {
        let mut yes = Interaction::default();
        yes.has_question_mark = QuestionMark::Yes;
        let mut no = Interaction::default();
        no.has_question_mark = QuestionMark::No;
        let stats =
            RunStatistics::compute(&run_of(vec![yes.clone(), yes, no, Interaction::default()]));
        assert_eq!(stats.question_mark_yes, 2);
    }

    #[test]
    fn test_per_category_breakdown() {
        let stats = RunStatistics::compute(&run_of(vec![
            interaction(ResponseCategory::Long, Some(300), Some(60), Some(100.0)),
            interaction(ResponseCategory::Long, Some(500), Some(80), Some(100.0)),
            interaction(ResponseCategory::Short, Some(50), Some(5), Some(20.0)),
        ]));
        let long = &stats.per_category[&ResponseCategory::Long];
        assert_eq!(long.count, 2);
        assert_eq!(long.average_quality, 100.0);
        assert_eq!(long.average_length, 400.0);
        let short = &stats.per_category[&ResponseCategory::Short];
        assert_eq!(short.count, 1);
        assert_eq!(short.average_length, 50.0);
        assert!(!stats.per_category.contains_key(&ResponseCategory::Medium));
    }

    #[test]
    fn test_extremes_serialize_as_null_when_absent() {
        let stats = RunStatistics::compute(&run_of(Vec::new()));
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["quality_extremes"].is_null());
    }
}
