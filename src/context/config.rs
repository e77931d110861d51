//! Context window configuration.

use crate::tokens::TokenCounter;

/// Tokens held back for the model's response by default.
pub const DEFAULT_RESERVED_TOKENS: usize = 500;

/// Context sizes of well-known models, in tokens.
pub const MODEL_CONTEXT_WINDOWS: &[(&str, usize)] = &[
    ("gpt-4", 8_192),
    ("gpt-4-turbo", 128_000),
    ("gpt-4o", 128_000),
    ("gpt-3.5-turbo", 16_385),
    ("claude-3-opus", 200_000),
    ("claude-3-sonnet", 200_000),
    ("claude-3-haiku", 200_000),
    ("claude-3-5-sonnet", 200_000),
];

/// Fixed limits for one [`ContextWindow`](crate::context::ContextWindow).
///
/// # Examples
///
/// ```
/// use ctx_chunker::ContextWindowConfig;
///
/// let config = ContextWindowConfig::new(1000).with_reserved_tokens(200);
/// assert_eq!(config.capacity(), 800);
/// ```
#[derive(Debug, Clone)]
pub struct ContextWindowConfig {
    /// Total context size of the model.
    pub max_tokens: usize,

    /// Tokens never available to stored messages.
    pub reserved_tokens: usize,

    /// Counter used to price each message.
    pub counter: TokenCounter,
}

impl ContextWindowConfig {
    /// Creates a configuration with the default reserve and counter.
    #[must_use]
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            reserved_tokens: DEFAULT_RESERVED_TOKENS,
            counter: TokenCounter::default(),
        }
    }

    /// Sets the reserved tokens.
    #[must_use]
    pub const fn with_reserved_tokens(mut self, reserved_tokens: usize) -> Self {
        self.reserved_tokens = reserved_tokens;
        self
    }

    /// Sets the token counter.
    #[must_use]
    pub fn with_counter(mut self, counter: TokenCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Tokens available to messages: `max_tokens - reserved_tokens`.
    ///
    /// A reserve larger than the window leaves a capacity of zero.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max_tokens.saturating_sub(self.reserved_tokens)
    }

    /// Preset for a known model name (case-insensitive).
    ///
    /// Returns `None` for models not in [`MODEL_CONTEXT_WINDOWS`].
    #[must_use]
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.to_lowercase();
        MODEL_CONTEXT_WINDOWS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|&(_, max_tokens)| Self::new(max_tokens))
    }
}
