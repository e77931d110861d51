//! CLI layer for ctx-chunker.
//!
//! Provides the command-line interface using clap, with commands for
//! chunking text, counting tokens, and replaying conversations through a
//! context window.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
