//! Output formatting for runs, statistics, and history views.
//!
//! Renderers downstream own their own layouts; these formatters exist for
//! the CLI and for quick inspection. They only format — classification and
//! aggregation always come from the core crate, never recomputed here.

use interaction_report_core::{HistoryIndex, RunStatistics, TestRun};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Formats a parsed run in the requested output format.
pub fn format_run(run: &TestRun, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(run)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(run).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(run_to_table(run)),
    }
}

/// Formats run statistics in the requested output format.
pub fn format_stats(stats: &RunStatistics, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(stats)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(stats).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(stats_to_table(stats)),
    }
}

/// Formats a history index in the requested output format.
pub fn format_history(index: &HistoryIndex, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(index.entries())
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(index.entries())
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Table => Ok(history_to_table(index)),
    }
}

fn run_to_table(run: &TestRun) -> String {
    let mut out = String::new();
    out.push_str(&format!("Run: {}\n", run.name));
    out.push_str(&format!("Source: {}\n", run.source_path));
    out.push_str(&format!(
        "Modified: {}\n",
        run.modified_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Interactions: {}\n\n", run.interaction_count()));

    out.push_str(&format!(
        "{:<4} {:<22} {:<8} {:>8} {:>7} {:>8}  {}\n",
        "#", "Timestamp", "Category", "Length", "Words", "Quality", "Question"
    ));
    for (i, interaction) in run.interactions.iter().enumerate() {
        let length = interaction
            .length
            .map_or("-".to_string(), |v| v.to_string());
        let words = interaction
            .word_count
            .map_or("-".to_string(), |v| v.to_string());
        let quality = interaction
            .quality_score
            .map_or("-".to_string(), |v| format!("{v:.1}%"));
        let question = truncate(&interaction.question, 40);
        out.push_str(&format!(
            "{:<4} {:<22} {:<8} {:>8} {:>7} {:>8}  {}\n",
            i + 1,
            truncate(&interaction.timestamp, 22),
            interaction.category,
            length,
            words,
            quality,
            question
        ));
    }
    out
}

fn stats_to_table(stats: &RunStatistics) -> String {
    let mut out = String::new();
    out.push_str(&format!("Interactions:     {}\n", stats.interaction_count));
    out.push_str(&format!("Average quality:  {:.1}%\n", stats.average_quality));
    out.push_str(&format!(
        "Average length:   {:.0} characters\n",
        stats.average_length
    ));
    out.push_str(&format!(
        "Average words:    {:.0}\n",
        stats.average_word_count
    ));
    out.push_str(&format!(
        "Question marks:   {}/{}\n",
        stats.question_mark_yes, stats.interaction_count
    ));
    match &stats.quality_extremes {
        Some(extremes) => out.push_str(&format!(
            "Quality range:    {:.1}% .. {:.1}% (spread {:.1})\n",
            extremes.min, extremes.max, extremes.range
        )),
        None => out.push_str("Quality range:    undefined (no known scores)\n"),
    }

    if !stats.per_category.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{:<8} {:>6} {:>12} {:>12}\n",
            "Category", "Count", "Avg quality", "Avg length"
        ));
        for (category, sub) in &stats.per_category {
            out.push_str(&format!(
                "{:<8} {:>6} {:>11.1}% {:>12.0}\n",
                category.to_string(),
                sub.count,
                sub.average_quality,
                sub.average_length
            ));
        }
    }
    out
}

fn history_to_table(index: &HistoryIndex) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:<20} {:>6} {:>12} {:>11}\n",
        "Run", "Modified", "Count", "Avg quality", "Avg length"
    ));
    for entry in index.entries() {
        out.push_str(&format!(
            "{:<28} {:<20} {:>6} {:>11.1}% {:>11.0}\n",
            truncate(&entry.name, 28),
            entry.modified_at.format("%Y-%m-%d %H:%M:%S"),
            entry.interaction_count,
            entry.statistics.average_quality,
            entry.statistics.average_length
        ));
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use interaction_report_core::{Interaction, TestRun};

    fn sample_run() -> TestRun {
        TestRun::new(
            "current_test_1.txt",
            "/logs/current_test_1.txt",
            Utc::now(),
            vec![Interaction {
                length: Some(300),
                word_count: Some(60),
                quality_score: Some(100.0),
                ..Interaction::default()
            }],
        )
    }

    #[test]
    fn test_json_output_is_valid_json() {
        let run = sample_run();
        let json = format_run(&run, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "current_test_1.txt");
    }

    #[test]
    fn test_table_output_lists_interactions() {
        let run = sample_run();
        let table = format_run(&run, OutputFormat::Table).unwrap();
        assert!(table.contains("current_test_1.txt"));
        assert!(table.contains("100.0%"));
    }

    #[test]
    fn test_stats_table_marks_undefined_extremes() {
        let empty = TestRun::new("e", "/dev/null", Utc::now(), Vec::new());
        let stats = RunStatistics::compute(&empty);
        let table = format_stats(&stats, OutputFormat::Table).unwrap();
        assert!(table.contains("undefined"));
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        let long = truncate("a very long question indeed", 10);
        assert_eq!(long.chars().count(), 10);
        assert!(long.ends_with('…'));
    }
}
