//! Text utilities shared by every provider

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// Terminal punctuation followed by whitespace. The punctuation stays with the
// sentence it ends.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Split text after `.`, `!` or `?` when followed by whitespace.
///
/// Abbreviations, decimals and quoted punctuation are not special-cased, so
/// `"Dr. Smith"` yields two sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // the punctuation mark is a single ASCII byte
        let end = boundary.start() + 1;
        push_segment(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_segment(&mut sentences, &text[start..]);

    sentences
}

fn push_segment(sentences: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        sentences.push(segment.to_string());
    }
}

/// Keep at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
