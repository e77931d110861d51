//! CLI command implementations.
//!
//! Each command reads its input, runs the library operation, and returns
//! the formatted output as a string.

use crate::chunking::{
    ChunkingStrategy, DEFAULT_SOURCE_LABEL, Segmenter, SegmenterConfig, StrategyOptions,
};
use crate::cli::output::{
    CountReport, OutputFormat, WindowEvent, WindowReport, format_chunks, format_count,
    format_strategies, format_window_report,
};
use crate::cli::parser::{Cli, Commands};
use crate::context::{ContextWindow, ContextWindowConfig};
use crate::core::Role;
use crate::error::{CommandError, ContextError, Error, Result};
use crate::io::read_input;
use crate::tokens::TokenCounter;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Chunk {
            file,
            strategy,
            max_tokens,
            window_size,
            overlap,
            max_chunk_size,
            counter,
            label,
            preview,
            preview_len,
        } => {
            let options = StrategyOptions {
                max_tokens: *max_tokens,
                window_size: *window_size,
                overlap: *overlap,
            };
            let args = ChunkArgs {
                strategy,
                options,
                max_chunk_size: *max_chunk_size,
                counter,
                label: label.as_deref(),
                preview: preview.then_some(*preview_len),
            };
            cmd_chunk(file.as_deref(), &args, format)
        }
        Commands::Count { file, counter } => cmd_count(file.as_deref(), counter, format),
        Commands::Window {
            file,
            max_tokens,
            reserved_tokens,
            model,
            counter,
            evict,
        } => {
            let config = window_config(*max_tokens, *reserved_tokens, model.as_deref(), counter)?;
            cmd_window(file, config, *evict, format)
        }
        Commands::Strategies => Ok(format_strategies(format)),
    }
}

/// Parameters of the `chunk` command.
struct ChunkArgs<'a> {
    strategy: &'a str,
    options: StrategyOptions,
    max_chunk_size: usize,
    counter: &'a str,
    label: Option<&'a str>,
    preview: Option<usize>,
}

fn cmd_chunk(file: Option<&Path>, args: &ChunkArgs<'_>, format: OutputFormat) -> Result<String> {
    let counter = TokenCounter::from_name(args.counter)?;
    let strategy = ChunkingStrategy::from_name(args.strategy, &args.options)?;
    let text = read_input(file)?;

    let label = args
        .label
        .or_else(|| file.and_then(|f| f.file_name()).and_then(|n| n.to_str()))
        .filter(|name| *name != "-")
        .unwrap_or(DEFAULT_SOURCE_LABEL);

    let config = SegmenterConfig::with_max_chunk_size(args.max_chunk_size)
        .counter(counter)
        .source_label(label);
    let chunks = Segmenter::new(config).chunk(&text, &strategy)?;

    Ok(format_chunks(&chunks, args.preview, format))
}

fn cmd_count(file: Option<&Path>, counter: &str, format: OutputFormat) -> Result<String> {
    let counter = TokenCounter::from_name(counter)?;
    let text = read_input(file)?;

    let report = CountReport {
        counter: counter.name().to_string(),
        tokens: counter.count(&text),
        bytes: text.len(),
    };
    Ok(format_count(&report, format))
}

fn window_config(
    max_tokens: usize,
    reserved_tokens: usize,
    model: Option<&str>,
    counter: &str,
) -> Result<ContextWindowConfig> {
    let config = match model {
        Some(model) => ContextWindowConfig::for_model(model).ok_or_else(|| Error::Config {
            message: format!("unknown model: {model}"),
        })?,
        None => ContextWindowConfig::new(max_tokens),
    };

    Ok(config
        .with_reserved_tokens(reserved_tokens)
        .with_counter(TokenCounter::from_name(counter)?))
}

/// One line of a JSON-lines conversation.
#[derive(Debug, Deserialize)]
struct ConversationLine {
    role: Role,
    content: String,
}

fn cmd_window(
    file: &Path,
    config: ContextWindowConfig,
    evict: bool,
    format: OutputFormat,
) -> Result<String> {
    let text = read_input(Some(file))?;
    let mut window = ContextWindow::new(config);
    let mut events = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let entry: ConversationLine = serde_json::from_str(raw)
            .map_err(|e| CommandError::Parse(format!("line {line}: {e}")))?;
        let tokens = window.count_tokens(&entry.content);

        let outcome = if evict {
            window
                .add_message_evicting(entry.content, entry.role)
                .map(|evicted| evicted.len())
        } else {
            window.add_message(entry.content, entry.role).map(|_| 0)
        };

        let event = match outcome {
            Ok(evicted) => WindowEvent::Admitted {
                line,
                role: entry.role,
                tokens,
                usage: window.current_usage(),
                evicted,
            },
            Err(Error::Context(ContextError::ContextWindowExceeded { needed, available })) => {
                WindowEvent::Rejected {
                    line,
                    role: entry.role,
                    needed,
                    available,
                }
            }
            Err(e) => return Err(e),
        };
        events.push(event);
    }

    debug!(
        events = events.len(),
        retained = window.len(),
        usage = window.current_usage(),
        "replayed conversation"
    );

    let report = WindowReport {
        max_tokens: window.config().max_tokens,
        reserved_tokens: window.config().reserved_tokens,
        capacity: window.capacity(),
        counter: window.config().counter.name().to_string(),
        events,
        retained: window.len(),
        usage: window.current_usage(),
        utilization: window.utilization(),
    };
    Ok(format_window_report(&report, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn chunk_cli(file: PathBuf, strategy: &str, format: &str) -> Cli {
        Cli {
            verbose: false,
            format: format.to_string(),
            command: Commands::Chunk {
                file: Some(file),
                strategy: strategy.to_string(),
                max_tokens: 5,
                window_size: 6,
                overlap: 2,
                max_chunk_size: 5,
                counter: "words".to_string(),
                label: None,
                preview: false,
                preview_len: 80,
            },
        }
    }

    #[test]
    fn test_chunk_command_labels_with_file_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "story.txt", "One two three. Four five six. Seven.");

        let output = execute(&chunk_cli(path, "fixed", "json")).unwrap();
        let chunks: serde_json::Value = serde_json::from_str(&output).unwrap();
        let chunks = chunks.as_array().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0]["source_label"], "story.txt");
        assert_eq!(chunks[0]["content"], "One two three.");
        assert_eq!(chunks[1]["content"], "Four five six. Seven.");
    }

    #[test]
    fn test_chunk_command_rejects_unknown_strategy() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "text");
        let result = execute(&chunk_cli(path, "topic", "text"));
        assert!(matches!(result, Err(Error::Chunking(_))));
    }

    #[test]
    fn test_count_command() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "one two three");
        let cli = Cli {
            verbose: false,
            format: "text".to_string(),
            command: Commands::Count {
                file: Some(path),
                counter: "words".to_string(),
            },
        };
        assert_eq!(
            execute(&cli).unwrap(),
            "3 tokens (words counter, 13 bytes)\n"
        );
    }

    fn window_cli(file: PathBuf, evict: bool) -> Cli {
        Cli {
            verbose: false,
            format: "json".to_string(),
            command: Commands::Window {
                file,
                max_tokens: 10,
                reserved_tokens: 2,
                model: None,
                counter: "words".to_string(),
                evict,
            },
        }
    }

    const CONVERSATION: &str = r#"{"role": "system", "content": "be brief"}
{"role": "user", "content": "one two three four"}

{"role": "assistant", "content": "five six seven"}
"#;

    #[test]
    fn test_window_command_rejects_without_evict() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "chat.jsonl", CONVERSATION);

        let output = execute(&window_cli(path, false)).unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["capacity"], 8);
        assert_eq!(report["events"][2]["event"], "rejected");
        assert_eq!(report["events"][2]["line"], 4);
        assert_eq!(report["events"][2]["available"], 2);
        assert_eq!(report["usage"], 6);
    }

    #[test]
    fn test_window_command_evicts() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "chat.jsonl", CONVERSATION);

        let output = execute(&window_cli(path, true)).unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["events"][2]["event"], "admitted");
        assert_eq!(report["events"][2]["evicted"], 1);
        assert_eq!(report["retained"], 2);
        assert_eq!(report["usage"], 7);
    }

    #[test]
    fn test_window_command_bad_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "chat.jsonl", "{\"role\": \"robot\", \"content\": \"x\"}\n");
        let result = execute(&window_cli(path, false));
        assert!(matches!(result, Err(Error::Command(CommandError::Parse(_)))));
    }

    #[test]
    fn test_window_unknown_model() {
        let result = window_config(10, 0, Some("nonexistent"), "words");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_strategies_command() {
        let cli = Cli {
            verbose: false,
            format: "text".to_string(),
            command: Commands::Strategies,
        };
        let output = execute(&cli).unwrap();
        assert!(output.contains("sliding"));
    }
}
