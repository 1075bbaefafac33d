//! Paragraph and sentence segmentation over byte ranges.
//!
//! Every segment is a trimmed range into the source string, so chunks built
//! from consecutive segments keep the source's inner whitespace untouched.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

fn paragraph_break_regex() -> &'static Regex {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid paragraph pattern"))
}

fn sentence_end_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| {
        Regex::new(r#"[.!?]+["'”’)\]]*(?:\s+|$)|[。！？…]+[」』”’）)]*\s*"#)
            .expect("valid sentence pattern")
    })
}

/// Shrink a range so it excludes leading and trailing whitespace.
///
/// Returns `None` when the range holds whitespace only.
pub fn trim_range(source: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &source[range.clone()];
    let trimmed_start = slice.trim_start();
    if trimmed_start.is_empty() {
        return None;
    }
    let start = range.start + (slice.len() - trimmed_start.len());
    let end = start + trimmed_start.trim_end().len();
    Some(start..end)
}

/// Paragraph ranges of `source`, split on blank lines.
pub fn paragraphs(source: &str) -> Vec<Range<usize>> {
    paragraphs_in(source, 0..source.len())
}

/// Paragraph ranges within `range` of `source`.
pub fn paragraphs_in(source: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let slice = &source[range.clone()];
    let mut result = Vec::new();
    let mut start = 0;
    for m in paragraph_break_regex().find_iter(slice) {
        if let Some(r) = trim_range(source, range.start + start..range.start + m.start()) {
            result.push(r);
        }
        start = m.end();
    }
    if let Some(r) = trim_range(source, range.start + start..range.end) {
        result.push(r);
    }
    result
}

/// Sentence ranges within `range` of `source`.
///
/// A sentence ends after a run of terminal punctuation and any closing
/// quotes or brackets. Text after the last terminator forms a final sentence.
pub fn sentences_in(source: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let slice = &source[range.clone()];
    let mut result = Vec::new();
    let mut start = 0;
    for m in sentence_end_regex().find_iter(slice) {
        if let Some(r) = trim_range(source, range.start + start..range.start + m.end()) {
            result.push(r);
        }
        start = m.end();
    }
    if start < slice.len() {
        if let Some(r) = trim_range(source, range.start + start..range.end) {
            result.push(r);
        }
    }
    result
}

/// Sentence ranges within `range`, respecting paragraph breaks.
pub fn sentences_across(source: &str, range: Range<usize>) -> Vec<Range<usize>> {
    paragraphs_in(source, range)
        .into_iter()
        .flat_map(|p| sentences_in(source, p))
        .collect()
}

/// Cut a range into pieces of at most `max_chars` characters.
///
/// Cuts fall on char boundaries; each piece is trimmed and blank pieces are
/// dropped.
pub fn hard_cut(source: &str, range: Range<usize>, max_chars: usize) -> Vec<Range<usize>> {
    let max_chars = max_chars.max(1);
    let slice = &source[range.clone()];
    let mut result = Vec::new();
    let mut piece_start = 0;
    let mut count = 0;

    for (offset, c) in slice.char_indices() {
        if count == max_chars {
            if let Some(r) = trim_range(source, range.start + piece_start..range.start + offset) {
                result.push(r);
            }
            piece_start = offset;
            count = 0;
        }
        // leading whitespace does not count toward a piece
        if count == 0 && c.is_whitespace() {
            piece_start = offset + c.len_utf8();
            continue;
        }
        count += 1;
    }
    if let Some(r) = trim_range(source, range.start + piece_start..range.end) {
        result.push(r);
    }
    result
}

/// Number of characters in a range.
pub fn char_len(source: &str, range: &Range<usize>) -> usize {
    source[range.clone()].chars().count()
}
