//! Structured diagnostics for one log parse.
//!
//! The report travels beside the parsed run: renderers that only want the
//! records can ignore it, while quality tooling can surface dropped sections
//! and logged-vs-derived discrepancies without re-parsing.

use serde::{Deserialize, Serialize};

use interaction_report_core::classify::Discrepancy;

/// A discrepancy tied to the interaction it was found in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDiscrepancy {
    /// Zero-based position of the interaction within the run.
    pub interaction: usize,
    pub discrepancy: Discrepancy,
}

/// Diagnostics from parsing one log text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseReport {
    /// Run name the report belongs to.
    pub name: String,
    /// Sections seen by the strategy that produced the interactions.
    pub sections_found: usize,
    /// Sections the marker-anchored primary strategy saw. Equal to
    /// `sections_found` unless the delimiter fallback produced the run, in
    /// which case this preserves how many marker sections were dropped
    /// before falling back.
    pub primary_sections_found: usize,
    /// Sections that yielded an interaction.
    pub interactions_parsed: usize,
    /// Sections with no recognizable fields, dropped without failing the run.
    pub sections_dropped: usize,
    /// True when the legacy delimiter fallback produced the sections.
    pub fallback_used: bool,
    /// Logged values that disagree with values derived from the counts.
    /// Both sides are preserved; consumers decide which to trust.
    pub discrepancies: Vec<InteractionDiscrepancy>,
}

impl ParseReport {
    /// Fraction of sections that produced an interaction; `0.0` for a
    /// sectionless log.
    pub fn section_yield(&self) -> f64 {
        if self.sections_found == 0 {
            return 0.0;
        }
        self.interactions_parsed as f64 / self.sections_found as f64
    }

    /// True when every section parsed cleanly and nothing disagreed.
    pub fn is_clean(&self) -> bool {
        self.sections_dropped == 0 && self.discrepancies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_yield_handles_empty_log() {
        let report = ParseReport::default();
        assert_eq!(report.section_yield(), 0.0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_section_yield_ratio() {
        let report = ParseReport {
            sections_found: 4,
            primary_sections_found: 4,
            interactions_parsed: 3,
            sections_dropped: 1,
            ..ParseReport::default()
        };
        assert_eq!(report.section_yield(), 0.75);
        assert!(!report.is_clean());
    }
}
