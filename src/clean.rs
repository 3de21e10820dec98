//! Per-row cleaning rules for review bodies and titles.

use crate::config::{NO_REVIEW_TEXT_PLACEHOLDER, NO_TITLE_PLACEHOLDER};

/// "Read more" suffixes the review site appends to collapsed reviews.
pub const DISCARDABLE_ENDING_WITH_SPACE: &str = "... More";
pub const DISCARDABLE_ENDING_WITHOUT_SPACE: &str = "...More";

/// A cleaned field plus which rules fired on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub value: String,
    pub defaulted: bool,
    pub marker_stripped: bool,
    pub capped: bool,
}

/// Cut the text before the first truncation marker. The spaced marker is
/// checked first, then the unspaced one on whatever is left.
pub fn strip_truncation_markers(text: &str) -> &str {
    let text = match text.find(DISCARDABLE_ENDING_WITH_SPACE) {
        Some(pos) => &text[..pos],
        None => text,
    };
    match text.find(DISCARDABLE_ENDING_WITHOUT_SPACE) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}

pub fn clean_review_text(text: Option<&str>, max_chars: usize) -> CleanedText {
    let raw = text.unwrap_or(NO_REVIEW_TEXT_PLACEHOLDER);
    let stripped = strip_truncation_markers(raw);
    let capped = truncate_chars(stripped, max_chars);

    CleanedText {
        value: capped.to_string(),
        defaulted: text.is_none(),
        marker_stripped: stripped.len() != raw.len(),
        capped: capped.len() != stripped.len(),
    }
}

/// Titles are only capped; they never carry the "read more" marker.
pub fn clean_review_title(title: Option<&str>, max_chars: usize) -> CleanedText {
    let raw = title.unwrap_or(NO_TITLE_PLACEHOLDER);
    let capped = truncate_chars(raw, max_chars);

    CleanedText {
        value: capped.to_string(),
        defaulted: title.is_none(),
        marker_stripped: false,
        capped: capped.len() != raw.len(),
    }
}
