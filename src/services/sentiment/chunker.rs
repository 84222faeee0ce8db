//! Paragraph-aware text chunking.
//!
//! Long inputs are split at blank lines and greedily packed into chunks of
//! at most `max_length` characters. A paragraph that alone exceeds the limit
//! becomes its own oversized chunk; it is never cut mid-word.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Chunk;

/// Separator used when packing paragraphs into one chunk.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();

fn paragraph_break() -> &'static Regex {
    // A newline, optional whitespace, then another newline.
    PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"))
}

/// Split `text` into chunks of at most `max_length` characters.
///
/// Text that already fits is returned unchanged as a single chunk.
pub fn split_into_chunks(text: &str, max_length: usize) -> Vec<String> {
    if text.chars().count() <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let separator_len = PARAGRAPH_SEPARATOR.len();

    for paragraph in paragraph_break().split(text) {
        if paragraph.trim().is_empty() {
            continue;
        }
        let paragraph_len = paragraph.chars().count();

        if current.is_empty() {
            current.push_str(paragraph);
            current_len = paragraph_len;
        } else if current_len + separator_len + paragraph_len > max_length {
            chunks.push(std::mem::take(&mut current));
            current.push_str(paragraph);
            current_len = paragraph_len;
        } else {
            current.push_str(PARAGRAPH_SEPARATOR);
            current.push_str(paragraph);
            current_len += separator_len + paragraph_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split `text` and tag each piece with its position.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<Chunk> {
    split_into_chunks(text, max_length)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk::new(index, text))
        .collect()
}
