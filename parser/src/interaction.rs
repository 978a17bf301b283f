//! Extracting one [`Interaction`] from one section of log text.

use tracing::debug;

use interaction_report_core::{Interaction, NOT_AVAILABLE, QuestionMark, ResponseCategory};

use crate::fields::{PATTERNS, capture_f64, capture_text, capture_u64};

/// Attempts to extract an interaction from one section.
///
/// Every field is independently optional: a missing label leaves the
/// sentinel (`"N/A"` for strings, `None` for numbers) and does not disturb
/// the other fields. `None` is returned only when *no* field matched at all,
/// in which case the caller skips the section; this function never panics on
/// malformed input.
pub fn parse_section(section: &str) -> Option<Interaction> {
    let mut recognized = 0usize;
    let mut seen = |matched: bool| {
        if matched {
            recognized += 1;
        }
    };

    let timestamp = capture_text(&PATTERNS.timestamp, section);
    seen(timestamp.is_some());
    let question = capture_text(&PATTERNS.question, section);
    seen(question.is_some());
    let answer = capture_text(&PATTERNS.answer, section);
    seen(answer.is_some());
    let raw_category = capture_text(&PATTERNS.category, section);
    seen(raw_category.is_some());
    let length = capture_u64(&PATTERNS.length, section);
    seen(length.is_some());
    let word_count = capture_u64(&PATTERNS.word_count, section);
    seen(word_count.is_some());
    let quality_score = capture_f64(&PATTERNS.quality_score, section);
    seen(quality_score.is_some());
    let question_mark = capture_text(&PATTERNS.question_mark, section);
    seen(question_mark.is_some());
    let question_screenshot = capture_text(&PATTERNS.question_screenshot, section);
    seen(question_screenshot.is_some());
    let answer_screenshot = capture_text(&PATTERNS.answer_screenshot, section);
    seen(answer_screenshot.is_some());

    if recognized == 0 {
        debug!(
            section_len = section.len(),
            "section has no recognizable fields, skipping"
        );
        return None;
    }

    let raw_category = raw_category.unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let category = ResponseCategory::from_label(&raw_category);
    let has_question_mark = question_mark
        .as_deref()
        .map(QuestionMark::from_label)
        .unwrap_or(QuestionMark::Unknown);

    Some(Interaction {
        timestamp: timestamp.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        question: question.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        answer: answer.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        category,
        raw_category,
        length,
        word_count,
        quality_score,
        has_question_mark,
        question_screenshot: question_screenshot.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        answer_screenshot: answer_screenshot.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    })
}
