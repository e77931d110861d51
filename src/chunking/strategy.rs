//! Chunking strategy configuration.

use crate::chunking::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP, DEFAULT_WINDOW_SIZE};
use crate::error::{ChunkingError, Result};
use serde::{Deserialize, Serialize};

/// How text is cut into chunks.
///
/// A pure configuration value. Variants may be built directly; the engine
/// validates them before touching any text. The checked constructors
/// validate up front instead.
///
/// # Examples
///
/// ```
/// use ctx_chunker::ChunkingStrategy;
///
/// assert!(ChunkingStrategy::sliding_window(100, 20).is_ok());
/// assert!(ChunkingStrategy::sliding_window(100, 150).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChunkingStrategy {
    /// Sentences packed under `min(max_tokens, engine max_chunk_size)`.
    FixedSize {
        /// Token limit per chunk.
        max_tokens: usize,
    },
    /// Blank-line paragraphs packed under the engine budget.
    Paragraph,
    /// Unicode sentences packed under the engine budget.
    Sentence,
    /// Paragraph chunks re-packed under the engine budget.
    ///
    /// A paragraph-locality heuristic, not topic detection.
    Semantic,
    /// Overlapping sentence windows.
    SlidingWindow {
        /// Window size in tokens.
        size: usize,
        /// Tokens shared between consecutive windows; less than `size`.
        overlap: usize,
    },
}

impl ChunkingStrategy {
    /// Creates a validated fixed-size strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidParameter`] if `max_tokens` is zero.
    pub fn fixed_size(max_tokens: usize) -> Result<Self> {
        let strategy = Self::FixedSize { max_tokens };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Creates a validated sliding-window strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidParameter`] if `size` is zero or
    /// `overlap >= size`.
    pub fn sliding_window(size: usize, overlap: usize) -> Result<Self> {
        let strategy = Self::SlidingWindow { size, overlap };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Checks the strategy's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidParameter`] naming the bad parameter.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedSize { max_tokens: 0 } => Err(ChunkingError::invalid_parameter(
                "max_tokens",
                "must be greater than zero",
            )
            .into()),
            Self::SlidingWindow { size: 0, .. } => Err(ChunkingError::invalid_parameter(
                "size",
                "must be greater than zero",
            )
            .into()),
            Self::SlidingWindow { size, overlap } if overlap >= size => Err(
                ChunkingError::invalid_parameter("overlap", "must be less than window size")
                    .into(),
            ),
            _ => Ok(()),
        }
    }

    /// Returns the strategy name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FixedSize { .. } => "fixed",
            Self::Paragraph => "paragraph",
            Self::Sentence => "sentence",
            Self::Semantic => "semantic",
            Self::SlidingWindow { .. } => "sliding",
        }
    }

    /// Returns a description of the strategy.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FixedSize { .. } => "Sentences packed under a fixed token limit",
            Self::Paragraph => "Paragraphs packed under the engine budget",
            Self::Sentence => "Unicode sentences packed under the engine budget",
            Self::Semantic => "Adjacent paragraph chunks merged under the engine budget",
            Self::SlidingWindow { .. } => "Overlapping sentence windows",
        }
    }

    /// Builds a strategy by name (case-insensitive).
    ///
    /// # Arguments
    ///
    /// * `name` - One of `fixed`, `paragraph`, `sentence`, `semantic`, `sliding`.
    /// * `options` - Numeric parameters for the strategies that take them.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::UnknownStrategy`] for unrecognised names and
    /// [`ChunkingError::InvalidParameter`] for invalid parameters.
    pub fn from_name(name: &str, options: &StrategyOptions) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "fixed" | "fixed_size" | "fixed-size" => Self::fixed_size(options.max_tokens),
            "paragraph" => Ok(Self::Paragraph),
            "sentence" => Ok(Self::Sentence),
            "semantic" => Ok(Self::Semantic),
            "sliding" | "sliding_window" | "sliding-window" => {
                Self::sliding_window(options.window_size, options.overlap)
            }
            _ => Err(ChunkingError::UnknownStrategy {
                name: name.to_string(),
            }
            .into()),
        }
    }
}

/// Numeric parameters used when a strategy is selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOptions {
    /// Limit for the fixed-size strategy.
    pub max_tokens: usize,
    /// Window size for the sliding-window strategy.
    pub window_size: usize,
    /// Overlap for the sliding-window strategy.
    pub overlap: usize,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_CHUNK_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}
