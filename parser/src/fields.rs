//! Declarative field grammar for interaction sections.
//!
//! Each field the log producer writes is one `Label: value` rule here:
//! a label, a capture pattern, and the sentinel the record carries when the
//! label is absent. Adding a field to the format is a new pattern plus a new
//! accessor, not new control flow in the parser.
//!
//! Patterns are compiled once behind a [`LazyLock`], mirroring how the rest
//! of the format handling keeps its regex tables.

use std::sync::LazyLock;

use regex::Regex;

/// Compiled patterns for every recognized section field.
pub(crate) static PATTERNS: LazyLock<FieldPatterns> = LazyLock::new(FieldPatterns::new);

pub(crate) struct FieldPatterns {
    pub(crate) timestamp: Regex,
    pub(crate) question: Regex,
    pub(crate) answer: Regex,
    pub(crate) category: Regex,
    pub(crate) length: Regex,
    pub(crate) word_count: Regex,
    pub(crate) quality_score: Regex,
    pub(crate) question_mark: Regex,
    pub(crate) question_screenshot: Regex,
    pub(crate) answer_screenshot: Regex,
}

impl FieldPatterns {
    fn new() -> Self {
        Self {
            // Single-line fields: capture to end of line.
            timestamp: Regex::new(r"Timestamp: (.+)").expect("static regex must compile"),
            category: Regex::new(r"Response Category: (.+)").expect("static regex must compile"),
            question_mark: Regex::new(r"Question Mark at End: (.+)").expect("static regex must compile"),
            question_screenshot: Regex::new(r"Question Screenshot: (.+)").expect("static regex must compile"),
            answer_screenshot: Regex::new(r"Response Screenshot: (.+)").expect("static regex must compile"),
            // Quoted multi-line blocks: `[^"]` spans newlines, so no
            // multi-line flag is needed.
            question: Regex::new(r#"Question Asked:\s*\n"([^"]+)""#).expect("static regex must compile"),
            answer: Regex::new(r#"AI Response:\s*\n"([^"]+)""#).expect("static regex must compile"),
            // Numeric fields with trailing units.
            length: Regex::new(r"Response Length: (\d+) characters").expect("static regex must compile"),
            word_count: Regex::new(r"Word Count: (\d+)").expect("static regex must compile"),
            quality_score: Regex::new(r"Quality Score: ([\d.]+)%").expect("static regex must compile"),
        }
    }
}

/// First capture of `re` in `section`, trimmed, or `None`.
pub(crate) fn capture_text(re: &Regex, section: &str) -> Option<String> {
    re.captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// First capture parsed as an integer; a capture that fails to parse is
/// treated the same as an absent field.
pub(crate) fn capture_u64(re: &Regex, section: &str) -> Option<u64> {
    capture_text(re, section).and_then(|text| text.parse().ok())
}

/// First capture parsed as a float, with the same absence semantics.
pub(crate) fn capture_f64(re: &Regex, section: &str) -> Option<f64> {
    capture_text(re, section).and_then(|text| text.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_fields_capture_to_end_of_line() {
        let section = "Timestamp: 2024-03-01 10:22:13\nResponse Category: LONG\n";
        assert_eq!(
            capture_text(&PATTERNS.timestamp, section).as_deref(),
            Some("2024-03-01 10:22:13")
        );
        assert_eq!(
            capture_text(&PATTERNS.category, section).as_deref(),
            Some("LONG")
        );
    }

    #[test]
    fn test_quoted_blocks_span_lines() {
        let section = "Question Asked:\n\"What is Rust?\nAnd why?\"\n";
        assert_eq!(
            capture_text(&PATTERNS.question, section).as_deref(),
            Some("What is Rust?\nAnd why?")
        );
    }

    #[test]
    fn test_numeric_captures() {
        let section = "Response Length: 312 characters\nWord Count: 57\nQuality Score: 98.5%\n";
        assert_eq!(capture_u64(&PATTERNS.length, section), Some(312));
        assert_eq!(capture_u64(&PATTERNS.word_count, section), Some(57));
        assert_eq!(capture_f64(&PATTERNS.quality_score, section), Some(98.5));
    }

    #[test]
    fn test_absent_fields_capture_nothing() {
        let section = "unrelated text\n";
        assert_eq!(capture_text(&PATTERNS.timestamp, section), None);
        assert_eq!(capture_u64(&PATTERNS.length, section), None);
        assert_eq!(capture_f64(&PATTERNS.quality_score, section), None);
    }

    #[test]
    fn test_length_requires_unit_suffix() {
        // Without the `characters` suffix the line is a different field.
        assert_eq!(capture_u64(&PATTERNS.length, "Response Length: 42\n"), None);
    }

    #[test]
    fn test_malformed_number_is_treated_as_absent() {
        // `[\d.]+` can match digit-and-dot runs that are not valid floats.
        assert_eq!(
            capture_f64(&PATTERNS.quality_score, "Quality Score: 1.2.3%\n"),
            None
        );
    }
}
