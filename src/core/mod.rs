//! Core domain models for ctx-chunker.
//!
//! Plain data produced by the segmentation engine and the context-window
//! tracker. No I/O dependencies.

pub mod chunk;
pub mod message;

pub use chunk::TextChunk;
pub use message::{Message, Role};
