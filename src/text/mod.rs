//! Text boundary detection.
//!
//! Splitters partition a byte range of a string into consecutive,
//! non-overlapping spans. The spans of one call cover the range exactly:
//! every span keeps the whitespace that follows it, so joining the spans
//! reproduces the input and trimming a span yields the unit itself.

pub mod boundaries;

pub use boundaries::{
    grapheme_spans, paragraph_spans, sentence_spans, split_paragraphs, split_sentences,
    subword_spans, truncate_graphemes, unicode_sentence_spans, word_spans,
};
