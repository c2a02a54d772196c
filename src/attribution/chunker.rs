//! Splitting a document into overlapping character chunks.

use crate::error::{QuoteweaveError, Result};

/// One chunk of the source document, numbered in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub text: String,
}

/// Split `text` into chunks of `chunk_chars` characters where consecutive
/// chunks share `overlap` characters.
///
/// The final chunk may be shorter. An empty document yields no chunks.
pub fn chunk_text(text: &str, chunk_chars: usize, overlap: usize) -> Result<Vec<TextChunk>> {
    if chunk_chars == 0 {
        return Err(QuoteweaveError::configuration(
            "chunk_chars",
            "must be greater than zero",
        ));
    }
    if overlap >= chunk_chars {
        return Err(QuoteweaveError::configuration(
            "chunk_overlap",
            format!("must be smaller than chunk_chars ({overlap} >= {chunk_chars})"),
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let step = chunk_chars - overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        let end = (start + chunk_chars).min(chars.len());
        chunks.push(TextChunk {
            index: chunks.len(),
            text: chars[start..end].iter().collect(),
        });
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
