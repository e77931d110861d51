//! Token-bounded segmentation.
//!
//! Five strategies split text into chunks that fit a token budget:
//!
//! - **Fixed size**: punctuation-delimited sentences packed under an explicit limit
//! - **Paragraph**: blank-line paragraphs, with a sentence and word fallback
//! - **Sentence**: Unicode sentence boundaries, with a word fallback
//! - **Semantic**: paragraph chunks re-packed so neighbours share a chunk
//! - **Sliding window**: overlapping windows of sentences
//!
//! All of them share one greedy first-fit packer and a static fallback
//! table for units that are larger than the budget on their own.

pub mod fallback;
mod pack;
pub mod parallel;
pub mod segmenter;
mod sliding;
pub mod strategy;

pub use fallback::{Fallback, fallback_chain};
pub use parallel::Document;
pub use segmenter::{Segmenter, SegmenterConfig};
pub use strategy::{ChunkingStrategy, StrategyOptions};

/// Default engine chunk budget in tokens.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;

/// Default sliding-window size in tokens.
pub const DEFAULT_WINDOW_SIZE: usize = 500;

/// Default sliding-window overlap in tokens.
pub const DEFAULT_OVERLAP: usize = 50;

/// Default source label attached to chunks.
pub const DEFAULT_SOURCE_LABEL: &str = "text";

/// Lists available chunking strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["fixed", "paragraph", "sentence", "semantic", "sliding"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_strategies() {
        let strategies = available_strategies();
        assert_eq!(strategies.len(), 5);
        for name in strategies {
            let strategy = ChunkingStrategy::from_name(name, &StrategyOptions::default()).unwrap();
            assert_eq!(strategy.name(), name);
        }
    }

    #[test]
    fn test_defaults_are_consistent() {
        assert!(DEFAULT_OVERLAP < DEFAULT_WINDOW_SIZE);
        assert!(DEFAULT_MAX_CHUNK_SIZE > 0);
    }
}
