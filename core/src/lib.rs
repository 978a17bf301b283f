//! Core types, classification, and aggregation for AI interaction test runs.
//!
//! This crate defines the structured records produced by the log parser and
//! the derived views computed from them:
//!
//! - [`Interaction`] — one question/answer exchange with its logged metrics.
//! - [`TestRun`] — the ordered interactions parsed from one log file.
//! - [`classify`] — the total length/word-count classifier, quality scoring,
//!   and logged-vs-derived discrepancy checks.
//! - [`RunStatistics`] — per-run averages, extremes, and category
//!   distribution, recomputed on demand.
//! - [`HistoryIndex`] — recency-ordered view over many runs with lookup by
//!   name.
//!
//! Everything here is pure: no I/O, no regex, no environment access. The
//! parsing side lives in the `interaction-report-parser` crate; renderers
//! consume these types read-only and must not reclassify or re-aggregate on
//! their own.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use interaction_report_core::*;
//!
//! let interaction = Interaction {
//!     length: Some(300),
//!     word_count: Some(10),
//!     ..Interaction::default()
//! };
//! // Length alone makes this LONG; the low word count does not demote it.
//! assert_eq!(
//!     classify::classify(interaction.length, interaction.word_count),
//!     ResponseCategory::Long,
//! );
//!
//! let run = TestRun::new("demo", "/logs/demo.txt", Utc::now(), vec![interaction]);
//! let stats = RunStatistics::compute(&run);
//! assert_eq!(stats.interaction_count, 1);
//! ```

pub mod classify;
mod history;
mod stats;
mod types;

pub use history::{HistoryEntry, HistoryIndex};
pub use stats::{CategoryStats, QualityExtremes, RunStatistics};
pub use types::*;
