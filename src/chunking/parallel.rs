//! Parallel batch segmentation.
//!
//! Documents are independent, so a batch is spread across the rayon pool
//! with one document per task. Each document is segmented exactly as
//! [`Segmenter::chunk`] would do it alone.

use crate::chunking::{ChunkingStrategy, Segmenter};
use crate::core::TextChunk;
use crate::error::Result;
use rayon::prelude::*;
use tracing::debug;

/// A labelled input to [`Segmenter::chunk_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    /// Source label attached to every chunk of this document.
    pub label: &'a str,
    /// Text to segment.
    pub text: &'a str,
}

impl<'a> Document<'a> {
    /// Creates a labelled document.
    #[must_use]
    pub const fn new(label: &'a str, text: &'a str) -> Self {
        Self { label, text }
    }
}

impl Segmenter {
    /// Segments many documents in parallel.
    ///
    /// Results come back in input order, one chunk list per document, each
    /// indexed from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctx_chunker::{ChunkingStrategy, Document, Segmenter};
    ///
    /// let docs = [
    ///     Document::new("a.txt", "First. Second."),
    ///     Document::new("b.txt", "Third."),
    /// ];
    /// let batches = Segmenter::default()
    ///     .chunk_batch(&docs, &ChunkingStrategy::Sentence)
    ///     .unwrap();
    /// assert_eq!(batches.len(), 2);
    /// assert_eq!(batches[1][0].source_label, "b.txt");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChunkingError::InvalidParameter`] if the
    /// configuration is invalid; no document is processed in that case.
    pub fn chunk_batch(
        &self,
        documents: &[Document<'_>],
        strategy: &ChunkingStrategy,
    ) -> Result<Vec<Vec<TextChunk>>> {
        self.validate(strategy)?;

        let batches = documents
            .par_iter()
            .map(|doc| self.chunk_labeled(doc.text, strategy, doc.label))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            documents = documents.len(),
            chunks = batches.iter().map(Vec::len).sum::<usize>(),
            strategy = strategy.name(),
            "segmented batch"
        );
        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::SegmenterConfig;
    use crate::tokens::TokenCounter;

    fn segmenter() -> Segmenter {
        Segmenter::new(SegmenterConfig::with_max_chunk_size(4).counter(TokenCounter::Words))
    }

    #[test]
    fn test_batch_matches_sequential() {
        let texts = [
            "One two three. Four five six. Seven.",
            "Alpha beta.\n\nGamma delta epsilon zeta eta.",
            "",
            "Single.",
        ];
        let docs: Vec<Document<'_>> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Document::new(["a", "b", "c", "d"][i], text))
            .collect();
        let strategy = ChunkingStrategy::Paragraph;

        let batches = segmenter().chunk_batch(&docs, &strategy).unwrap();
        assert_eq!(batches.len(), texts.len());

        for (doc, batch) in docs.iter().zip(&batches) {
            let alone = segmenter().chunk(doc.text, &strategy).unwrap();
            let contents: Vec<&str> = batch.iter().map(|c| c.content.as_str()).collect();
            let expected: Vec<&str> = alone.iter().map(|c| c.content.as_str()).collect();
            assert_eq!(contents, expected);
            assert!(batch.iter().all(|c| c.source_label == doc.label));
        }
        assert!(batches[2].is_empty());
    }

    #[test]
    fn test_batch_indices_restart_per_document() {
        let docs = [
            Document::new("x", "A b c. D e f. G h i."),
            Document::new("y", "J k l. M n o."),
        ];
        let batches = segmenter()
            .chunk_batch(&docs, &ChunkingStrategy::Sentence)
            .unwrap();
        for batch in &batches {
            for (i, chunk) in batch.iter().enumerate() {
                assert_eq!(chunk.index, i);
            }
        }
    }

    #[test]
    fn test_batch_rejects_invalid_strategy() {
        let docs = [Document::new("x", "text")];
        let invalid = ChunkingStrategy::SlidingWindow {
            size: 5,
            overlap: 5,
        };
        assert!(segmenter().chunk_batch(&docs, &invalid).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let batches = segmenter()
            .chunk_batch(&[], &ChunkingStrategy::Semantic)
            .unwrap();
        assert!(batches.is_empty());
    }
}
