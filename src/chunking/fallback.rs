//! Fallback table for units that exceed the budget on their own.
//!
//! Each strategy has a fixed, finite chain of finer granularities. An
//! oversized unit is re-split at the first level of its chain and the
//! pieces are packed under the same budget; a piece that is still oversized
//! moves on to the next level. Every step consumes one chain entry, so the
//! descent is bounded by the chain length and can never cycle.

use crate::chunking::ChunkingStrategy;
use crate::text::{grapheme_spans, subword_spans, unicode_sentence_spans, word_spans};
use std::ops::Range;

/// One step of a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Re-split at Unicode sentence boundaries.
    Sentences,
    /// Re-split into whitespace-delimited words.
    Words,
    /// Re-split at Unicode word boundaries, for runs with no whitespace.
    Subwords,
    /// Re-split into grapheme clusters. A single cluster is atomic.
    Graphemes,
    /// Emit the unit whole.
    Whole,
}

impl Fallback {
    /// Splits `text[span]` at this level, or `None` for [`Fallback::Whole`].
    pub(crate) fn spans(self, text: &str, span: Range<usize>) -> Option<Vec<Range<usize>>> {
        match self {
            Self::Sentences => Some(unicode_sentence_spans(text, span)),
            Self::Words => Some(word_spans(text, span)),
            Self::Subwords => Some(subword_spans(text, span)),
            Self::Graphemes => Some(grapheme_spans(text, span)),
            Self::Whole => None,
        }
    }
}

const FIXED_SIZE: &[Fallback] = &[Fallback::Words, Fallback::Subwords, Fallback::Graphemes];
const SENTENCE: &[Fallback] = &[Fallback::Words, Fallback::Subwords, Fallback::Graphemes];
const PARAGRAPH: &[Fallback] = &[
    Fallback::Sentences,
    Fallback::Words,
    Fallback::Subwords,
    Fallback::Graphemes,
    Fallback::Whole,
];
const SLIDING_WINDOW: &[Fallback] = &[Fallback::Words, Fallback::Subwords, Fallback::Graphemes];

/// Returns the fallback chain the engine applies for `strategy`.
///
/// `Semantic` builds on paragraph chunks and so shares the paragraph chain.
/// `SlidingWindow` refines oversized sentences through its chain before
/// windowing.
///
/// # Examples
///
/// ```
/// use ctx_chunker::{ChunkingStrategy, Fallback, fallback_chain};
///
/// let chain = fallback_chain(&ChunkingStrategy::Paragraph);
/// assert_eq!(chain.first(), Some(&Fallback::Sentences));
/// assert_eq!(chain.last(), Some(&Fallback::Whole));
/// ```
#[must_use]
pub const fn fallback_chain(strategy: &ChunkingStrategy) -> &'static [Fallback] {
    match strategy {
        ChunkingStrategy::FixedSize { .. } => FIXED_SIZE,
        ChunkingStrategy::Sentence => SENTENCE,
        ChunkingStrategy::Paragraph | ChunkingStrategy::Semantic => PARAGRAPH,
        ChunkingStrategy::SlidingWindow { .. } => SLIDING_WINDOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chains_are_short_and_never_repeat() {
        for strategy in [
            ChunkingStrategy::FixedSize { max_tokens: 1 },
            ChunkingStrategy::Paragraph,
            ChunkingStrategy::Sentence,
            ChunkingStrategy::Semantic,
            ChunkingStrategy::SlidingWindow {
                size: 2,
                overlap: 1,
            },
        ] {
            let chain = fallback_chain(&strategy);
            assert!(!chain.is_empty());
            assert!(chain.len() <= 5);
            for (i, level) in chain.iter().enumerate() {
                assert!(!chain[i + 1..].contains(level));
            }
        }
    }

    #[test]
    fn test_graphemes_are_finest_split() {
        for strategy in [
            ChunkingStrategy::FixedSize { max_tokens: 5 },
            ChunkingStrategy::Sentence,
            ChunkingStrategy::Paragraph,
        ] {
            let splits: Vec<_> = fallback_chain(&strategy)
                .iter()
                .filter(|level| **level != Fallback::Whole)
                .collect();
            assert_eq!(splits.last(), Some(&&Fallback::Graphemes));
        }
    }

    #[test]
    fn test_level_spans() {
        let text = "One two. Three four.";
        let words = Fallback::Words.spans(text, 0..text.len()).unwrap();
        assert_eq!(words.len(), 4);
        let sentences = Fallback::Sentences.spans(text, 0..text.len()).unwrap();
        assert_eq!(sentences.len(), 2);
        assert!(Fallback::Whole.spans(text, 0..text.len()).is_none());

        let run = "東京都";
        let chars = Fallback::Graphemes.spans(run, 0..run.len()).unwrap();
        assert_eq!(chars.len(), 3);
        assert_eq!(Fallback::Words.spans(run, 0..run.len()).unwrap().len(), 1);
    }
}
