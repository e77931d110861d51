//! Text chunk representation.
//!
//! Chunks are produced by the segmentation engine and handed to the caller
//! whole; they hold no reference back to the text they came from.

use crate::text::truncate_graphemes;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A token-bounded piece of text.
///
/// # Examples
///
/// ```
/// use ctx_chunker::TextChunk;
///
/// let chunk = TextChunk::new("Hello, world!".to_string(), 0, 2, "notes.txt".to_string());
/// assert_eq!(chunk.size(), 13);
/// assert_eq!(chunk.token_count, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Chunk content, trimmed of surrounding whitespace.
    pub content: String,

    /// Sequential index within one segmentation call (0-based).
    pub index: usize,

    /// Token cost of `content` under the counter that produced it.
    pub token_count: usize,

    /// Label of the source the text came from.
    pub source_label: String,

    /// Byte range of `content` in the original text.
    ///
    /// Sliding-window chunks have overlapping ranges.
    pub byte_range: Range<usize>,

    /// Name of the chunking strategy that produced the chunk.
    pub strategy: Option<String>,
}

impl TextChunk {
    /// Creates a new chunk with an empty byte range and no strategy.
    #[must_use]
    pub fn new(content: String, index: usize, token_count: usize, source_label: String) -> Self {
        Self {
            content,
            index,
            token_count,
            source_label,
            byte_range: 0..0,
            strategy: None,
        }
    }

    /// Sets the byte range in the source text.
    #[must_use]
    pub const fn with_byte_range(mut self, range: Range<usize>) -> Self {
        self.byte_range = range;
        self
    }

    /// Sets the strategy name.
    #[must_use]
    pub fn with_strategy(mut self, strategy: &str) -> Self {
        self.strategy = Some(strategy.to_string());
        self
    }

    /// Returns the size of the content in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Checks if the chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the start byte offset in the original text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.byte_range.start
    }

    /// Returns the end byte offset in the original text.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.byte_range.end
    }

    /// Checks if this chunk's byte range overlaps with another range.
    #[must_use]
    pub const fn overlaps_with(&self, other_range: &Range<usize>) -> bool {
        self.byte_range.start < other_range.end && other_range.start < self.byte_range.end
    }

    /// Returns a preview of the content (first `max_graphemes` graphemes).
    #[must_use]
    pub fn preview(&self, max_graphemes: usize) -> &str {
        truncate_graphemes(&self.content, max_graphemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str) -> TextChunk {
        TextChunk::new(content.to_string(), 0, 1, "test".to_string())
    }

    #[test]
    fn test_chunk_new() {
        let chunk = TextChunk::new("Hello".to_string(), 3, 2, "doc".to_string());
        assert_eq!(chunk.content, "Hello");
        assert_eq!(chunk.index, 3);
        assert_eq!(chunk.token_count, 2);
        assert_eq!(chunk.source_label, "doc");
        assert_eq!(chunk.byte_range, 0..0);
        assert!(chunk.strategy.is_none());
    }

    #[test]
    fn test_chunk_builders() {
        let chunk = chunk("world").with_byte_range(7..12).with_strategy("sentence");
        assert_eq!(chunk.start(), 7);
        assert_eq!(chunk.end(), 12);
        assert_eq!(chunk.strategy.as_deref(), Some("sentence"));
    }

    #[test]
    fn test_chunk_overlaps_with() {
        let chunk = chunk("test").with_byte_range(10..20);
        assert!(chunk.overlaps_with(&(15..25)));
        assert!(chunk.overlaps_with(&(5..15)));
        assert!(!chunk.overlaps_with(&(20..30)));
        assert!(!chunk.overlaps_with(&(0..10)));
    }

    #[test]
    fn test_chunk_preview() {
        let chunk = chunk("Hello, 世界!");
        assert_eq!(chunk.preview(5), "Hello");
        assert_eq!(chunk.preview(9), "Hello, 世界");
        assert_eq!(chunk.preview(100), "Hello, 世界!");
    }

    #[test]
    fn test_chunk_empty() {
        let chunk = chunk("");
        assert!(chunk.is_empty());
        assert_eq!(chunk.size(), 0);
    }

    #[test]
    fn test_chunk_serialization() {
        let chunk = chunk("test").with_byte_range(0..4).with_strategy("fixed");
        let json = serde_json::to_string(&chunk).unwrap();
        let deserialized: TextChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, chunk);
    }
}
