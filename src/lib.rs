//! # ctx-chunker
//!
//! Token-bounded text segmentation and context-window budgeting for
//! language-model clients.
//!
//! Language models accept a finite number of tokens per request. This crate
//! splits long text into chunks that each fit a token limit, and tracks an
//! accumulating conversation against a fixed context capacity, evicting the
//! oldest messages when asked to make room.
//!
//! ## Features
//!
//! - **Segmentation**: fixed-size, paragraph, sentence, semantic and
//!   sliding-window strategies over one greedy packer
//! - **Fallback**: oversized units are re-split at finer granularity, down to
//!   single grapheme clusters
//! - **Context window**: atomic admission and FIFO eviction
//! - **Pluggable counting**: word and byte approximations, or any function
//! - **Batch mode**: many documents segmented in parallel with rayon
//!
//! ## Example
//!
//! ```
//! use ctx_chunker::{ChunkingStrategy, Segmenter, SegmenterConfig, TokenCounter};
//!
//! let config = SegmenterConfig::with_max_chunk_size(8).counter(TokenCounter::Words);
//! let chunks = Segmenter::new(config)
//!     .chunk("First paragraph here.\n\nSecond one.", &ChunkingStrategy::Paragraph)
//!     .unwrap();
//! assert_eq!(chunks.len(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod context;
pub mod core;
pub mod error;
pub mod io;
pub mod text;
pub mod tokens;

// Re-export commonly used types at crate root
pub use error::{ChunkingError, CommandError, ContextError, Error, IoError, Result};

// Re-export core domain types
pub use core::{Message, Role, TextChunk};

// Re-export token counting
pub use tokens::{TokenCounter, available_counters};

// Re-export chunking types
pub use chunking::{
    ChunkingStrategy, Document, Fallback, Segmenter, SegmenterConfig, StrategyOptions,
    available_strategies, fallback_chain,
};

// Re-export context window types
pub use context::{ContextWindow, ContextWindowConfig};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
