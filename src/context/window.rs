//! The context window tracker.

use crate::context::ContextWindowConfig;
use crate::core::{Message, Role};
use crate::error::{ContextError, Result};
use std::collections::VecDeque;
use tracing::debug;

/// An ordered message history bounded by a token capacity.
///
/// After every successful operation `current_usage()` equals the sum of the
/// retained messages' token counts and never exceeds `capacity()`. The
/// window is a plain owned value; callers sharing one across threads must
/// serialize access themselves.
///
/// # Examples
///
/// ```
/// use ctx_chunker::{ContextWindow, ContextWindowConfig, Role, TokenCounter};
///
/// let config = ContextWindowConfig::new(10)
///     .with_reserved_tokens(4)
///     .with_counter(TokenCounter::Words);
/// let mut window = ContextWindow::new(config);
///
/// window.add_message("one two three", Role::User).unwrap();
/// assert!(window.add_message("four five six seven", Role::Assistant).is_err());
/// assert_eq!(window.current_usage(), 3);
///
/// let evicted = window.optimize(4);
/// assert_eq!(evicted.len(), 1);
/// assert!(window.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ContextWindow {
    config: ContextWindowConfig,
    history: VecDeque<Message>,
    current_usage: usize,
}

impl ContextWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new(config: ContextWindowConfig) -> Self {
        Self {
            config,
            history: VecDeque::new(),
            current_usage: 0,
        }
    }

    /// Appends a message if its cost fits the remaining capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::ContextWindowExceeded`] if admitting the
    /// message would exceed capacity. The window is left untouched.
    pub fn add_message(&mut self, content: impl Into<String>, role: Role) -> Result<&Message> {
        let content = content.into();
        let cost = self.config.counter.count(&content);
        self.admit(content, role, cost)
    }

    /// Evicts the oldest messages until `required` more tokens would fit.
    ///
    /// Stops early if the history empties. Returns the evicted messages,
    /// oldest first. Calling it again once the condition holds is a no-op.
    pub fn optimize(&mut self, required: usize) -> Vec<Message> {
        let capacity = self.capacity();
        let mut evicted = Vec::new();

        while self.current_usage.saturating_add(required) > capacity {
            let Some(oldest) = self.history.pop_front() else {
                break;
            };
            self.current_usage -= oldest.token_count;
            evicted.push(oldest);
        }

        if !evicted.is_empty() {
            debug!(
                evicted = evicted.len(),
                required,
                usage = self.current_usage,
                "evicted oldest messages"
            );
        }
        evicted
    }

    /// Makes room for a message and appends it.
    ///
    /// Nothing is evicted if the message could not fit even in an empty
    /// window. Returns the evicted messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::ContextWindowExceeded`] if the message alone
    /// exceeds capacity. The window is left untouched.
    pub fn add_message_evicting(
        &mut self,
        content: impl Into<String>,
        role: Role,
    ) -> Result<Vec<Message>> {
        let content = content.into();
        let cost = self.config.counter.count(&content);
        if cost > self.capacity() {
            return Err(self.exceeded(cost).into());
        }

        let evicted = self.optimize(cost);
        self.admit(content, role, cost)?;
        Ok(evicted)
    }

    /// Drops every message.
    pub fn reset(&mut self) {
        self.history.clear();
        self.current_usage = 0;
        debug!("context window reset");
    }

    /// Counts `text` with the configured counter.
    #[must_use]
    pub fn count_tokens(&self, text: &str) -> usize {
        self.config.counter.count(text)
    }

    /// Returns whether `text` would be admitted right now.
    #[must_use]
    pub fn fits(&self, text: &str) -> bool {
        self.count_tokens(text) <= self.available()
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ContextWindowConfig {
        &self.config
    }

    /// Returns the retained messages, oldest first.
    pub fn messages(&self) -> impl ExactSizeIterator<Item = &Message> {
        self.history.iter()
    }

    /// Returns the number of retained messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the tokens used by retained messages.
    #[must_use]
    pub const fn current_usage(&self) -> usize {
        self.current_usage
    }

    /// Returns the usable capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the tokens still free.
    #[must_use]
    pub const fn available(&self) -> usize {
        self.capacity().saturating_sub(self.current_usage)
    }

    /// Returns usage as a fraction of capacity; `0.0` for zero capacity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> f64 {
        let capacity = self.capacity();
        if capacity == 0 {
            return 0.0;
        }
        self.current_usage as f64 / capacity as f64
    }

    fn admit(&mut self, content: String, role: Role, cost: usize) -> Result<&Message> {
        if cost > self.available() {
            debug!(cost, available = self.available(), %role, "rejected message");
            return Err(self.exceeded(cost).into());
        }

        self.current_usage += cost;
        self.history.push_back(Message::new(content, role, cost));
        debug!(cost, usage = self.current_usage, %role, "admitted message");

        self.history
            .back()
            .ok_or_else(|| self.exceeded(cost).into())
    }

    const fn exceeded(&self, needed: usize) -> ContextError {
        ContextError::ContextWindowExceeded {
            needed,
            available: self.available(),
        }
    }
}
