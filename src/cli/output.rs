//! Output formatting for CLI commands.
//!
//! Supports text, pretty JSON, and newline-delimited JSON output.

use crate::chunking::{ChunkingStrategy, StrategyOptions, available_strategies};
use crate::core::{Role, TextChunk};
use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// One compact JSON object per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string; unknown names fall back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// Formats a chunk list.
///
/// With `preview`, text output shows at most that many grapheme clusters
/// of each chunk.
#[must_use]
pub fn format_chunks(chunks: &[TextChunk], preview: Option<usize>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_chunks_text(chunks, preview),
        OutputFormat::Json => format_json(&chunks),
        OutputFormat::Ndjson => format_ndjson(chunks),
    }
}

fn format_chunks_text(chunks: &[TextChunk], preview: Option<usize>) -> String {
    if chunks.is_empty() {
        return "No chunks produced.\n".to_string();
    }

    let mut output = String::new();
    for chunk in chunks {
        let _ = writeln!(
            output,
            "--- chunk {} [{}..{}] {} tokens ({}) ---",
            chunk.index,
            chunk.start(),
            chunk.end(),
            chunk.token_count,
            chunk.source_label
        );
        let shown = preview.map_or(chunk.content.as_str(), |len| chunk.preview(len));
        if shown.len() < chunk.content.len() {
            let _ = writeln!(output, "{shown}...");
        } else {
            let _ = writeln!(output, "{shown}");
        }
    }

    let total: usize = chunks.iter().map(|c| c.token_count).sum();
    let _ = writeln!(output, "\n{} chunks, {total} tokens", chunks.len());
    output
}

/// Token count of one input.
#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    /// Counter that produced the count.
    pub counter: String,
    /// Token count.
    pub tokens: usize,
    /// Input size in bytes.
    pub bytes: usize,
}

/// Formats a token count.
#[must_use]
pub fn format_count(report: &CountReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "{} tokens ({} counter, {} bytes)\n",
            report.tokens, report.counter, report.bytes
        ),
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => format_ndjson(std::slice::from_ref(report)),
    }
}

/// What happened to one replayed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    /// The message was added to the window.
    Admitted {
        /// 1-based input line.
        line: usize,
        /// Message role.
        role: Role,
        /// Token cost of the message.
        tokens: usize,
        /// Window usage after admission.
        usage: usize,
        /// Messages evicted to make room.
        evicted: usize,
    },
    /// The message did not fit.
    Rejected {
        /// 1-based input line.
        line: usize,
        /// Message role.
        role: Role,
        /// Token cost of the message.
        needed: usize,
        /// Tokens that were free.
        available: usize,
    },
}

/// Result of replaying a conversation through a context window.
#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    /// Total context size.
    pub max_tokens: usize,
    /// Reserved tokens.
    pub reserved_tokens: usize,
    /// Usable capacity.
    pub capacity: usize,
    /// Counter used to price messages.
    pub counter: String,
    /// Per-message outcomes in input order.
    pub events: Vec<WindowEvent>,
    /// Messages retained at the end.
    pub retained: usize,
    /// Final usage.
    pub usage: usize,
    /// Final usage as a fraction of capacity.
    pub utilization: f64,
}

/// Formats a window replay report.
#[must_use]
pub fn format_window_report(report: &WindowReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_window_report_text(report),
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => format_ndjson(&report.events),
    }
}

fn format_window_report_text(report: &WindowReport) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Context window: {} tokens ({} reserved, capacity {}, {} counter)",
        report.max_tokens, report.reserved_tokens, report.capacity, report.counter
    );
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for event in &report.events {
        match event {
            WindowEvent::Admitted {
                line,
                role,
                tokens,
                usage,
                evicted,
            } => {
                let _ = write!(
                    output,
                    "{line:>5}  {role:<9}  admitted  {tokens:>6} tokens  usage {usage}"
                );
                if *evicted > 0 {
                    let _ = write!(output, "  (evicted {evicted})");
                }
                output.push('\n');
            }
            WindowEvent::Rejected {
                line,
                role,
                needed,
                available,
            } => {
                let _ = writeln!(
                    output,
                    "{line:>5}  {role:<9}  rejected  {needed:>6} tokens  {available} available"
                );
            }
        }
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    let _ = writeln!(
        output,
        "{} messages retained, {} / {} tokens ({:.1}%)",
        report.retained,
        report.usage,
        report.capacity,
        report.utilization * 100.0
    );
    output
}

/// Formats the strategy list.
#[must_use]
pub fn format_strategies(format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct StrategyInfo {
        name: &'static str,
        description: &'static str,
    }

    let options = StrategyOptions::default();
    let strategies: Vec<StrategyInfo> = available_strategies()
        .into_iter()
        .filter_map(|name| ChunkingStrategy::from_name(name, &options).ok())
        .map(|strategy| StrategyInfo {
            name: strategy.name(),
            description: strategy.description(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::from("Available strategies:\n");
            for info in &strategies {
                let _ = writeln!(output, "  {:<10} {}", info.name, info.description);
            }
            output
        }
        OutputFormat::Json => format_json(&strategies),
        OutputFormat::Ndjson => format_ndjson(&strategies),
    }
}

/// Formats an error for the given output format.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json | OutputFormat::Ndjson => {
            serde_json::json!({ "error": error.to_string() }).to_string()
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

/// Formats items as newline-delimited JSON.
fn format_ndjson<T: Serialize>(items: &[T]) -> String {
    let mut output = String::new();
    for item in items {
        if let Ok(line) = serde_json::to_string(item) {
            output.push_str(&line);
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextError;

    fn chunk(index: usize, content: &str) -> TextChunk {
        TextChunk::new(content.to_string(), index, 2, "doc".to_string())
            .with_byte_range(0..content.len())
            .with_strategy("sentence")
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("ndjson"), OutputFormat::Ndjson);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_chunks_text() {
        let chunks = vec![chunk(0, "Hello there."), chunk(1, "General Kenobi.")];
        let output = format_chunks(&chunks, None, OutputFormat::Text);
        assert!(output.contains("--- chunk 0 [0..12] 2 tokens (doc) ---"));
        assert!(output.contains("General Kenobi."));
        assert!(output.contains("2 chunks, 4 tokens"));
    }

    #[test]
    fn test_format_chunks_preview() {
        let chunks = vec![chunk(0, "A rather long sentence.")];
        let output = format_chunks(&chunks, Some(8), OutputFormat::Text);
        assert!(output.contains("A rather..."));
        assert!(!output.contains("sentence."));
    }

    #[test]
    fn test_format_chunks_preview_counts_graphemes() {
        // Five clusters, seven chars.
        let chunks = vec![chunk(0, "cafe\u{301}s\u{327}")];
        let output = format_chunks(&chunks, Some(5), OutputFormat::Text);
        assert!(output.contains("cafe\u{301}s\u{327}\n"));
        assert!(!output.contains("..."));

        let output = format_chunks(&chunks, Some(4), OutputFormat::Text);
        assert!(output.contains("cafe\u{301}...\n"));
    }

    #[test]
    fn test_format_chunks_empty() {
        assert_eq!(
            format_chunks(&[], None, OutputFormat::Text),
            "No chunks produced.\n"
        );
        assert_eq!(format_chunks(&[], None, OutputFormat::Json).trim(), "[]");
        assert!(format_chunks(&[], None, OutputFormat::Ndjson).is_empty());
    }

    #[test]
    fn test_format_chunks_ndjson() {
        let chunks = vec![chunk(0, "One."), chunk(1, "Two.")];
        let output = format_chunks(&chunks, None, OutputFormat::Ndjson);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["content"], "Two.");
        assert_eq!(value["strategy"], "sentence");
    }

    #[test]
    fn test_format_count() {
        let report = CountReport {
            counter: "words".to_string(),
            tokens: 3,
            bytes: 13,
        };
        assert_eq!(
            format_count(&report, OutputFormat::Text),
            "3 tokens (words counter, 13 bytes)\n"
        );
        let value: serde_json::Value =
            serde_json::from_str(&format_count(&report, OutputFormat::Json)).unwrap();
        assert_eq!(value["tokens"], 3);
    }

    #[test]
    fn test_format_window_report() {
        let report = WindowReport {
            max_tokens: 100,
            reserved_tokens: 20,
            capacity: 80,
            counter: "words".to_string(),
            events: vec![
                WindowEvent::Admitted {
                    line: 1,
                    role: Role::User,
                    tokens: 50,
                    usage: 50,
                    evicted: 0,
                },
                WindowEvent::Rejected {
                    line: 2,
                    role: Role::Assistant,
                    needed: 40,
                    available: 30,
                },
            ],
            retained: 1,
            usage: 50,
            utilization: 0.625,
        };

        let text = format_window_report(&report, OutputFormat::Text);
        assert!(text.contains("admitted"));
        assert!(text.contains("rejected"));
        assert!(text.contains("62.5%"));

        let ndjson = format_window_report(&report, OutputFormat::Ndjson);
        let first: serde_json::Value = serde_json::from_str(ndjson.lines().next().unwrap()).unwrap();
        assert_eq!(first["event"], "admitted");
        assert_eq!(first["role"], "user");
    }

    #[test]
    fn test_format_strategies() {
        let text = format_strategies(OutputFormat::Text);
        for name in available_strategies() {
            assert!(text.contains(name));
        }
        let json: serde_json::Value =
            serde_json::from_str(&format_strategies(OutputFormat::Json)).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_format_error() {
        let err: Error = ContextError::ContextWindowExceeded {
            needed: 5,
            available: 1,
        }
        .into();
        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert!(json["error"].as_str().unwrap().contains("needs 5 tokens"));
        assert!(format_error(&err, OutputFormat::Text).starts_with("context"));
    }
}
