//! Splitting raw log text into per-interaction sections.
//!
//! Every interaction in the log is introduced by the literal marker line
//! [`SECTION_MARKER`]. [`Sections`] slices the text from each marker
//! occurrence to the next. Older log producers separated sections with a
//! forty-`=` delimiter line instead; [`fallback_sections`] handles those.
//!
//! These are primitives: the decision of when to fall back belongs to the
//! parse pipeline (`parse_log_text_with_report`), which tries the delimiter
//! split only after the marker-anchored sections produced zero interactions.
//! Keeping that decision in one place means every consumer sees the same
//! fallback behavior.

/// Marker line introducing each interaction section.
pub const SECTION_MARKER: &str = "AI ASSISTANT INTERACTION DOCUMENTATION";

/// Legacy delimiter line between sections (forty `=` characters).
pub const SECTION_DELIMITER: &str = "========================================";

/// Minimum trimmed content for a fallback block to count as a section.
const MIN_FALLBACK_SECTION_LEN: usize = 100;

/// Lazy iterator over marker-delimited sections of `text`.
///
/// Each item starts at one occurrence of [`SECTION_MARKER`] and ends just
/// before the next occurrence (or at the end of the text). Text without any
/// marker yields nothing; that is a valid empty log, not an error.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    text: &'a str,
    next_start: Option<usize>,
}

impl<'a> Sections<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            next_start: text.find(SECTION_MARKER),
        }
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.next_start?;
        let search_from = start + SECTION_MARKER.len();
        let end = self.text[search_from..]
            .find(SECTION_MARKER)
            .map(|offset| search_from + offset);
        self.next_start = end;
        Some(&self.text[start..end.unwrap_or(self.text.len())])
    }
}

/// Legacy splitter: blocks between delimiter lines that still contain the
/// marker and carry more than trivial content.
///
/// Unlike [`Sections`], a block keeps everything between two delimiters,
/// including field lines written *above* the marker.
pub fn fallback_sections(text: &str) -> Vec<&str> {
    text.split(SECTION_DELIMITER)
        .filter(|block| {
            block.contains(SECTION_MARKER) && block.trim().len() > MIN_FALLBACK_SECTION_LEN
        })
        .collect()
}
