//! Token counting.
//!
//! Exact, model-specific tokenization lives outside this crate. Everything
//! here sees tokens only through [`TokenCounter::count`], which is total,
//! deterministic, and never negative.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Bytes per token assumed by [`TokenCounter::Bytes`].
pub const BYTES_PER_TOKEN: usize = 4;

/// Signature of a caller-supplied counting function.
pub type CountFn = dyn Fn(&str) -> usize + Send + Sync;

/// Pluggable token counter.
///
/// The two built-in approximations are monotonically non-decreasing in text
/// length and subadditive over concatenation. A custom counter is trusted to
/// be total and deterministic; nothing else is assumed about it.
///
/// # Examples
///
/// ```
/// use ctx_chunker::TokenCounter;
///
/// assert_eq!(TokenCounter::Words.count("one two  three"), 3);
/// assert_eq!(TokenCounter::Bytes.count("hello"), 2);
///
/// let chars = TokenCounter::custom(|text| text.chars().count());
/// assert_eq!(chars.count("héllo"), 5);
/// ```
#[derive(Clone, Default)]
pub enum TokenCounter {
    /// Counts whitespace-delimited words.
    Words,
    /// UTF-8 byte length divided by four, rounded up.
    #[default]
    Bytes,
    /// Delegates to an injected function.
    Custom(Arc<CountFn>),
}

impl TokenCounter {
    /// Wraps a counting function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Returns the token cost of `text`.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        match self {
            Self::Words => text.split_whitespace().count(),
            Self::Bytes => text.len().div_ceil(BYTES_PER_TOKEN),
            Self::Custom(f) => f(text),
        }
    }

    /// Returns the counter's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::Bytes => "bytes",
            Self::Custom(_) => "custom",
        }
    }

    /// Resolves a built-in counter by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for names other than `words` and `bytes`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "words" | "word" => Ok(Self::Words),
            "bytes" | "byte" => Ok(Self::Bytes),
            _ => Err(Error::Config {
                message: format!("unknown token counter: {name}"),
            }),
        }
    }
}

impl fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenCounter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Lists the built-in counter names.
#[must_use]
pub fn available_counters() -> Vec<&'static str> {
    vec!["words", "bytes"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_counter() {
        let counter = TokenCounter::Words;
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("   \n\t "), 0);
        assert_eq!(counter.count("Hello, world!"), 2);
        assert_eq!(counter.count("  leading and trailing  "), 3);
    }

    #[test]
    fn test_bytes_counter_rounds_up() {
        let counter = TokenCounter::Bytes;
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abc"), 1);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
        // 世 is three bytes
        assert_eq!(counter.count("世界"), 2);
    }

    #[test]
    fn test_custom_counter() {
        let counter = TokenCounter::custom(|text| text.len() * 2);
        assert_eq!(counter.count("abc"), 6);
        assert_eq!(counter.name(), "custom");
    }

    #[test]
    fn test_custom_counter_is_shared_on_clone() {
        let counter = TokenCounter::custom(|_| 7);
        let cloned = counter.clone();
        assert_eq!(cloned.count("anything"), 7);
    }

    #[test]
    fn test_default_is_bytes() {
        assert_eq!(TokenCounter::default().name(), "bytes");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TokenCounter::from_name("WORDS").unwrap().name(), "words");
        assert_eq!(TokenCounter::from_name("bytes").unwrap().name(), "bytes");
        assert!(matches!(
            TokenCounter::from_name("tiktoken"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let counter: TokenCounter = "words".parse().unwrap();
        assert_eq!(counter.name(), "words");
    }

    #[test]
    fn test_debug_shows_name() {
        assert_eq!(format!("{:?}", TokenCounter::Words), "words");
    }

    #[test]
    fn test_available_counters() {
        let counters = available_counters();
        assert!(counters.contains(&"words"));
        assert!(counters.contains(&"bytes"));
    }
}
