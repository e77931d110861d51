//! Context-window budget tracking.
//!
//! A [`ContextWindow`] holds an ordered message history against a fixed
//! token capacity. Admission is all-or-nothing and eviction is strictly
//! oldest first.

pub mod config;
pub mod window;

pub use config::{ContextWindowConfig, DEFAULT_RESERVED_TOKENS, MODEL_CONTEXT_WINDOWS};
pub use window::ContextWindow;
