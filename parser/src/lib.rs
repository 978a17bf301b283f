//! Parsing AI interaction test logs into structured runs.
//!
//! This crate turns the semi-structured text logs written by an automated
//! question/answer interaction test into the record types defined in
//! `interaction-report-core`. It owns everything between raw bytes and
//! structured records:
//!
//! - [`sections`] — splitting a log into per-interaction sections, with a
//!   legacy delimiter fallback.
//! - [`interaction`] — regex-driven field extraction for one section.
//! - [`discover`] — locating run files under an explicit root/pattern
//!   configuration and loading them (in parallel) into [`TestRun`]s.
//! - [`config`] — YAML discovery configuration.
//! - [`report`] — per-parse diagnostics, including logged-vs-derived
//!   discrepancies.
//! - [`output`] — JSON/YAML/table formatting for the CLI.
//!
//! # Main entry points
//!
//! - [`parse_log_text`] — parse in-memory log text, no filesystem access.
//! - [`parse_log_text_with_report`] — same, plus diagnostics.
//! - [`discover::discover_runs`] — find and load every run for a
//!   configuration.
//!
//! # Example
//!
//! ```
//! use interaction_report_parser::parse_log_text;
//!
//! let log = r#"AI ASSISTANT INTERACTION DOCUMENTATION
//! Timestamp: 2024-03-01 10:22:13
//! Question Asked:
//! "What is the capital of Finland?"
//! AI Response:
//! "Helsinki."
//! Response Category: SHORT
//! Response Length: 9 characters
//! Word Count: 1
//! "#;
//!
//! let interactions = parse_log_text(log);
//! assert_eq!(interactions.len(), 1);
//! assert_eq!(interactions[0].length, Some(9));
//! ```
//!
//! Data-shape problems never escape this crate as errors: unparseable
//! sections are dropped, absent fields become sentinels, and a log with no
//! sections parses to an empty run. Only I/O failures (see
//! [`discover::DiscoverError`]) propagate.
//!
//! [`TestRun`]: interaction_report_core::TestRun

pub mod config;
pub mod discover;
mod fields;
pub mod interaction;
pub mod output;
pub mod report;
pub mod sections;

use tracing::debug;

use interaction_report_core::{Interaction, classify};

use crate::report::{InteractionDiscrepancy, ParseReport};
use crate::sections::{Sections, fallback_sections};

/// A parsed log plus its diagnostics.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Interactions in order of appearance in the log.
    pub interactions: Vec<Interaction>,
    pub report: ParseReport,
}

/// Parses log text into interactions, in order of appearance.
///
/// Sections that yield no recognizable fields are skipped; text without any
/// section marker parses to an empty list. See
/// [`parse_log_text_with_report`] for the diagnostics variant.
pub fn parse_log_text(text: &str) -> Vec<Interaction> {
    parse_log_text_with_report("", text).interactions
}

/// Parses log text and reports how the parse went.
///
/// The marker-anchored splitter runs first. If it produces no interactions
/// at all — either no sections or only unrecognizable ones — the legacy
/// delimiter fallback is tried on the same text, matching the behavior of
/// older log producers. Logged category/quality values that disagree with
/// the values derived from the logged counts are recorded per interaction,
/// with both sides preserved.
pub fn parse_log_text_with_report(name: &str, text: &str) -> ParseOutcome {
    let mut primary_sections_found = 0usize;
    let mut interactions = Vec::new();
    for section in Sections::new(text) {
        primary_sections_found += 1;
        if let Some(parsed) = interaction::parse_section(section) {
            interactions.push(parsed);
        }
    }

    let mut sections_found = primary_sections_found;
    let mut fallback_used = false;
    if interactions.is_empty() {
        let blocks = fallback_sections(text);
        if !blocks.is_empty() {
            debug!(run = name, "primary split yielded nothing, trying delimiter fallback");
            fallback_used = true;
            sections_found = blocks.len();
            for block in blocks {
                if let Some(parsed) = interaction::parse_section(block) {
                    interactions.push(parsed);
                }
            }
        }
    }

    let discrepancies = interactions
        .iter()
        .enumerate()
        .flat_map(|(index, interaction)| {
            classify::check(interaction)
                .into_iter()
                .map(move |discrepancy| InteractionDiscrepancy {
                    interaction: index,
                    discrepancy,
                })
        })
        .collect();

    let report = ParseReport {
        name: name.to_string(),
        sections_found,
        primary_sections_found,
        interactions_parsed: interactions.len(),
        sections_dropped: sections_found.saturating_sub(interactions.len()),
        fallback_used,
        discrepancies,
    };

    ParseOutcome {
        interactions,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interaction_report_core::ResponseCategory;
    use interaction_report_core::classify::Discrepancy;

    #[test]
    fn test_good_and_malformed_sections_yield_one_interaction() {
        let log = "AI ASSISTANT INTERACTION DOCUMENTATION\n\
                   Timestamp: 2024-03-01 10:00:00\n\
                   Word Count: 12\n\
                   AI ASSISTANT INTERACTION DOCUMENTATION\n\
                   nothing recognizable in this one\n";
        let outcome = parse_log_text_with_report("mixed", log);
        assert_eq!(outcome.interactions.len(), 1);
        assert_eq!(outcome.report.sections_found, 2);
        assert_eq!(outcome.report.primary_sections_found, 2);
        assert_eq!(outcome.report.sections_dropped, 1);
        assert!(!outcome.report.fallback_used);
    }

    #[test]
    fn test_fallback_recovers_fields_written_above_the_marker() {
        // Older producers wrote the field lines above the marker. The
        // marker-anchored slice then starts past every field and parses to
        // nothing, so the pipeline must fall back to whole delimiter blocks,
        // which keep the lines above the marker.
        let log = format!(
            "Timestamp: 2024-03-01 09:00:00\nWord Count: 8\n{}\nAI ASSISTANT INTERACTION DOCUMENTATION\n",
            "x".repeat(110)
        );
        let outcome = parse_log_text_with_report("legacy", &log);
        assert_eq!(outcome.interactions.len(), 1);
        assert_eq!(outcome.interactions[0].timestamp, "2024-03-01 09:00:00");
        assert_eq!(outcome.interactions[0].word_count, Some(8));
        assert!(outcome.report.fallback_used);
        // Both strategies' section counts survive in the report.
        assert_eq!(outcome.report.primary_sections_found, 1);
        assert_eq!(outcome.report.sections_found, 1);
        assert_eq!(outcome.report.sections_dropped, 0);
    }

    #[test]
    fn test_fallback_report_keeps_primary_section_count() {
        // Three marker sections, none with a recognizable field; the
        // delimiter split collapses the text into one oversized block that
        // still parses to nothing. The report must show both views.
        let noise = "only unlabeled prose here\n".repeat(3);
        let log = format!(
            "AI ASSISTANT INTERACTION DOCUMENTATION\n{noise}AI ASSISTANT INTERACTION DOCUMENTATION\n{noise}AI ASSISTANT INTERACTION DOCUMENTATION\n{noise}"
        );
        let outcome = parse_log_text_with_report("noise", &log);
        assert!(outcome.interactions.is_empty());
        assert!(outcome.report.fallback_used);
        assert_eq!(outcome.report.primary_sections_found, 3);
        assert_eq!(outcome.report.sections_found, 1);
    }

    #[test]
    fn test_markerless_text_is_empty_run() {
        let outcome = parse_log_text_with_report("empty", "plain harness output\n");
        assert!(outcome.interactions.is_empty());
        assert_eq!(outcome.report.sections_found, 0);
        assert!(!outcome.report.fallback_used);
    }

    #[test]
    fn test_discrepancies_are_surfaced_not_resolved() {
        let log = "AI ASSISTANT INTERACTION DOCUMENTATION\n\
                   Response Category: SHORT\n\
                   Response Length: 300 characters\n\
                   Word Count: 10\n";
        let outcome = parse_log_text_with_report("drift", log);
        assert_eq!(outcome.interactions.len(), 1);
        // The logged label is kept on the record untouched.
        assert_eq!(outcome.interactions[0].category, ResponseCategory::Short);
        assert_eq!(
            outcome.report.discrepancies,
            vec![InteractionDiscrepancy {
                interaction: 0,
                discrepancy: Discrepancy::Category {
                    logged: ResponseCategory::Short,
                    derived: ResponseCategory::Long,
                },
            }]
        );
    }

    #[test]
    fn test_interaction_order_matches_source_order() {
        let log = (1..=4)
            .map(|i| {
                format!(
                    "AI ASSISTANT INTERACTION DOCUMENTATION\nTimestamp: 2024-03-01 10:00:0{i}\n"
                )
            })
            .collect::<String>();
        let interactions = parse_log_text(&log);
        let timestamps: Vec<&str> = interactions.iter().map(|i| i.timestamp.as_str()).collect();
        assert_eq!(
            timestamps,
            [
                "2024-03-01 10:00:01",
                "2024-03-01 10:00:02",
                "2024-03-01 10:00:03",
                "2024-03-01 10:00:04"
            ]
        );
    }
}
