//! The segmentation engine.

use crate::chunking::fallback::{Fallback, fallback_chain};
use crate::chunking::pack::{measure, pack};
use crate::chunking::sliding::window_spans;
use crate::chunking::{ChunkingStrategy, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_SOURCE_LABEL};
use crate::core::TextChunk;
use crate::error::{ChunkingError, Result};
use crate::text::{paragraph_spans, sentence_spans, unicode_sentence_spans};
use crate::tokens::TokenCounter;
use std::ops::Range;
use tracing::{debug, trace};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Budget for the paragraph, sentence, and semantic strategies, and the
    /// upper bound for fixed-size chunks.
    pub max_chunk_size: usize,
    /// Counter used to cost units and chunks.
    pub counter: TokenCounter,
    /// Label copied into every chunk.
    pub source_label: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            counter: TokenCounter::default(),
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }
}

impl SegmenterConfig {
    /// Creates a configuration with the given budget and default counter.
    #[must_use]
    pub fn with_max_chunk_size(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size,
            ..Self::default()
        }
    }

    /// Sets the token counter.
    #[must_use]
    pub fn counter(mut self, counter: TokenCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Sets the source label.
    #[must_use]
    pub fn source_label(mut self, label: &str) -> Self {
        self.source_label = label.to_string();
        self
    }
}

/// Splits text into token-bounded chunks.
///
/// Holds no state between calls; one engine can serve any number of
/// concurrent callers.
///
/// # Examples
///
/// ```
/// use ctx_chunker::{ChunkingStrategy, Segmenter, SegmenterConfig, TokenCounter};
///
/// let segmenter = Segmenter::new(
///     SegmenterConfig::with_max_chunk_size(9).counter(TokenCounter::Words),
/// );
/// let text = "The quick brown fox. Jumps over the lazy dog. Then naps.";
/// let chunks = segmenter.chunk(text, &ChunkingStrategy::Sentence).unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].content, "The quick brown fox. Jumps over the lazy dog.");
/// assert!(chunks.iter().all(|c| c.token_count <= 9));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Creates an engine from its configuration.
    #[must_use]
    pub const fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Returns the budget `strategy` packs under.
    ///
    /// For the sliding window this is the window size.
    #[must_use]
    pub fn budget(&self, strategy: &ChunkingStrategy) -> usize {
        match *strategy {
            ChunkingStrategy::FixedSize { max_tokens } => max_tokens.min(self.config.max_chunk_size),
            ChunkingStrategy::SlidingWindow { size, .. } => size,
            ChunkingStrategy::Paragraph
            | ChunkingStrategy::Sentence
            | ChunkingStrategy::Semantic => self.config.max_chunk_size,
        }
    }

    /// Checks the engine budget and the strategy's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidParameter`] for a zero engine budget
    /// or an invalid strategy.
    pub fn validate(&self, strategy: &ChunkingStrategy) -> Result<()> {
        if self.config.max_chunk_size == 0 {
            return Err(ChunkingError::invalid_parameter(
                "max_chunk_size",
                "must be greater than zero",
            )
            .into());
        }
        strategy.validate()
    }

    /// Splits `text` into chunks.
    ///
    /// Empty or whitespace-only text yields no chunks. Content never causes
    /// a failure: units that exceed the budget go through the strategy's
    /// fallback chain, down to single grapheme clusters, and a cluster is
    /// emitted whole even if it alone exceeds the budget.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidParameter`] if the configuration is
    /// invalid. Validation happens before any text is processed.
    pub fn chunk(&self, text: &str, strategy: &ChunkingStrategy) -> Result<Vec<TextChunk>> {
        self.chunk_labeled(text, strategy, &self.config.source_label)
    }

    pub(crate) fn chunk_labeled(
        &self,
        text: &str,
        strategy: &ChunkingStrategy,
        label: &str,
    ) -> Result<Vec<TextChunk>> {
        self.validate(strategy)?;

        let spans = self.spans(text, strategy);
        let chunks = self.emit(text, &spans, strategy.name(), label);

        debug!(
            strategy = strategy.name(),
            budget = self.budget(strategy),
            bytes = text.len(),
            chunks = chunks.len(),
            "segmented text"
        );
        Ok(chunks)
    }

    /// Computes chunk spans; the strategy is already validated.
    fn spans(&self, text: &str, strategy: &ChunkingStrategy) -> Vec<Range<usize>> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let whole = 0..text.len();
        let budget = self.budget(strategy);
        let chain = fallback_chain(strategy);
        let pass = Pass {
            text,
            counter: &self.config.counter,
            budget,
        };

        match *strategy {
            ChunkingStrategy::FixedSize { .. } => pass.pack(sentence_spans(text, whole), chain),
            ChunkingStrategy::Sentence => pass.pack(unicode_sentence_spans(text, whole), chain),
            ChunkingStrategy::Paragraph => pass.pack(paragraph_spans(text, whole), chain),
            ChunkingStrategy::Semantic => {
                let paragraphs = pass.pack(paragraph_spans(text, whole), chain);
                // Re-pack the paragraph chunks themselves; anything still
                // oversized is already at its smallest unit.
                pass.pack(paragraphs, &[])
            }
            ChunkingStrategy::SlidingWindow { size, overlap } => {
                window_spans(text, &self.config.counter, size, overlap)
            }
        }
    }

    /// Turns spans into indexed chunks, dropping whitespace-only spans.
    fn emit(
        &self,
        text: &str,
        spans: &[Range<usize>],
        strategy: &str,
        label: &str,
    ) -> Vec<TextChunk> {
        let mut chunks = Vec::with_capacity(spans.len());

        for span in spans {
            let Some(range) = trimmed_range(text, span) else {
                continue;
            };
            let content = &text[range.clone()];
            let token_count = self.config.counter.count(content);
            trace!(index = chunks.len(), tokens = token_count, "emitting chunk");

            chunks.push(
                TextChunk::new(
                    content.to_string(),
                    chunks.len(),
                    token_count,
                    label.to_string(),
                )
                .with_byte_range(range)
                .with_strategy(strategy),
            );
        }

        chunks
    }
}

/// One packing pass over a text at a fixed budget.
struct Pass<'a> {
    text: &'a str,
    counter: &'a TokenCounter,
    budget: usize,
}

impl Pass<'_> {
    /// Packs `spans` and resolves oversized groups through `chain`.
    ///
    /// The returned spans are contiguous and cover the same bytes as the
    /// input spans.
    fn pack(&self, spans: Vec<Range<usize>>, chain: &[Fallback]) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        self.pack_into(spans, chain, &mut out);
        out
    }

    fn pack_into(&self, spans: Vec<Range<usize>>, chain: &[Fallback], out: &mut Vec<Range<usize>>) {
        let units = measure(self.text, spans, self.counter);
        for group in pack(&units, self.budget) {
            let span = group.span(&units);
            if group.tokens > self.budget {
                self.descend(span, group.tokens, chain, out);
            } else {
                out.push(span);
            }
        }
    }

    /// Splits one oversized span at the next usable level of `chain`.
    fn descend(
        &self,
        span: Range<usize>,
        tokens: usize,
        chain: &[Fallback],
        out: &mut Vec<Range<usize>>,
    ) {
        let Some((&level, rest)) = chain.split_first() else {
            out.push(span);
            return;
        };

        match level.spans(self.text, span.clone()) {
            Some(pieces) if pieces.len() > 1 => {
                debug!(
                    ?level,
                    tokens,
                    budget = self.budget,
                    pieces = pieces.len(),
                    "splitting oversized unit"
                );
                self.pack_into(pieces, rest, out);
            }
            // Nothing finer at this level; try the next one.
            Some(_) => self.descend(span, tokens, rest, out),
            None => {
                debug!(tokens, budget = self.budget, "emitting oversized unit whole");
                out.push(span);
            }
        }
    }
}

/// Narrows `span` to exclude surrounding whitespace, or `None` if blank.
fn trimmed_range(text: &str, span: &Range<usize>) -> Option<Range<usize>> {
    let slice = &text[span.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let start = span.start + (slice.len() - slice.trim_start().len());
    Some(start..start + trimmed.len())
}
