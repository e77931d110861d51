//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::chunking::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP, DEFAULT_WINDOW_SIZE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ctx-chunker: token-bounded text segmentation and context budgeting.
///
/// Splits text into chunks that fit a token limit and replays
/// conversations through a bounded context window.
#[derive(Parser, Debug)]
#[command(name = "ctx-chunker")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split text into token-bounded chunks.
    ///
    /// Reads FILE, or standard input when FILE is absent or `-`.
    Chunk {
        /// Input file.
        file: Option<PathBuf>,

        /// Chunking strategy (fixed, paragraph, sentence, semantic, sliding).
        #[arg(short, long, default_value = "paragraph")]
        strategy: String,

        /// Token limit for the fixed strategy.
        #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
        max_tokens: usize,

        /// Window size for the sliding strategy.
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window_size: usize,

        /// Overlap between sliding windows.
        #[arg(long, default_value_t = DEFAULT_OVERLAP)]
        overlap: usize,

        /// Engine chunk budget in tokens.
        #[arg(long, env = "CTX_CHUNKER_MAX_CHUNK_SIZE", default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
        max_chunk_size: usize,

        /// Token counter (words, bytes).
        #[arg(short, long, env = "CTX_CHUNKER_COUNTER", default_value = "bytes")]
        counter: String,

        /// Source label attached to chunks (defaults to the file name).
        #[arg(short, long)]
        label: Option<String>,

        /// Show only a preview of each chunk in text output.
        #[arg(long)]
        preview: bool,

        /// Preview length in grapheme clusters.
        #[arg(long, default_value = "80")]
        preview_len: usize,
    },

    /// Count the tokens in text.
    Count {
        /// Input file (standard input when absent or `-`).
        file: Option<PathBuf>,

        /// Token counter (words, bytes).
        #[arg(short, long, env = "CTX_CHUNKER_COUNTER", default_value = "bytes")]
        counter: String,
    },

    /// Replay a JSON-lines conversation through a context window.
    ///
    /// Each line is an object with `role` and `content` fields.
    Window {
        /// Conversation file (standard input when `-`).
        file: PathBuf,

        /// Total context size in tokens.
        #[arg(long, env = "CTX_CHUNKER_MAX_TOKENS", default_value = "4096")]
        max_tokens: usize,

        /// Tokens reserved for the response.
        #[arg(long, env = "CTX_CHUNKER_RESERVED_TOKENS", default_value = "500")]
        reserved_tokens: usize,

        /// Model preset for the context size; overrides --max-tokens.
        #[arg(short, long)]
        model: Option<String>,

        /// Token counter (words, bytes).
        #[arg(short, long, env = "CTX_CHUNKER_COUNTER", default_value = "bytes")]
        counter: String,

        /// Evict oldest messages to make room instead of rejecting.
        #[arg(short, long)]
        evict: bool,
    },

    /// List available chunking strategies.
    Strategies,
}
