//! Sentence, paragraph, word, and character splitters.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {{
        static $name: OnceLock<Regex> = OnceLock::new();
        $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

/// Run of sentence terminators plus the whitespace after it.
#[allow(clippy::expect_used)]
fn sentence_end() -> &'static Regex {
    static_regex!(SENTENCE_END, r"[.!?]+\s*")
}

/// Blank line (optionally holding spaces) plus any further whitespace.
#[allow(clippy::expect_used)]
fn paragraph_break() -> &'static Regex {
    static_regex!(PARAGRAPH_BREAK, r"\n[^\S\n]*\n\s*")
}

#[allow(clippy::expect_used)]
fn word() -> &'static Regex {
    static_regex!(WORD, r"\S+\s*")
}

/// Turns a sequence of span end offsets into contiguous spans over `range`.
fn spans_from_ends(range: Range<usize>, ends: impl IntoIterator<Item = usize>) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = range.start;
    for end in ends {
        if end > start {
            spans.push(start..end);
            start = end;
        }
    }
    if start < range.end {
        spans.push(start..range.end);
    }
    spans
}

/// Splits `text[range]` after each run of `.`, `!` or `?`.
///
/// Each span keeps its terminator and trailing whitespace. Text after the
/// last terminator forms a final span.
///
/// # Examples
///
/// ```
/// use ctx_chunker::text::sentence_spans;
///
/// let text = "One. Two! Three";
/// let spans = sentence_spans(text, 0..text.len());
/// let parts: Vec<&str> = spans.into_iter().map(|r| &text[r]).collect();
/// assert_eq!(parts, vec!["One. ", "Two! ", "Three"]);
/// ```
#[must_use]
pub fn sentence_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let base = range.start;
    let ends = sentence_end()
        .find_iter(&text[range.clone()])
        .map(|m| base + m.end());
    spans_from_ends(range, ends)
}

/// Splits `text[range]` at Unicode sentence boundaries (UAX #29).
#[must_use]
pub fn unicode_sentence_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let base = range.start;
    let ends = text[range.clone()]
        .split_sentence_bound_indices()
        .map(|(offset, sentence)| base + offset + sentence.len());
    spans_from_ends(range, ends)
}

/// Splits `text[range]` at blank lines.
#[must_use]
pub fn paragraph_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let base = range.start;
    let ends = paragraph_break()
        .find_iter(&text[range.clone()])
        .map(|m| base + m.end());
    spans_from_ends(range, ends)
}

/// Splits `text[range]` into whitespace-delimited words.
///
/// Leading whitespace belongs to the first word.
#[must_use]
pub fn word_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let base = range.start;
    let ends = word().find_iter(&text[range.clone()]).map(|m| base + m.end());
    spans_from_ends(range, ends)
}

/// End offsets of `segments`, with whitespace segments folded into the
/// segment before them. Leading whitespace joins the first segment.
fn folded_ends<'a>(
    base: usize,
    segments: impl Iterator<Item = (usize, &'a str)>,
) -> Vec<usize> {
    let mut segments = segments.peekable();
    let mut ends = Vec::new();
    let mut seen_text = false;
    while let Some((offset, segment)) = segments.next() {
        seen_text |= !segment.trim().is_empty();
        let next_blank = segments
            .peek()
            .is_some_and(|(_, next)| next.trim().is_empty());
        if seen_text && !next_blank {
            ends.push(base + offset + segment.len());
        }
    }
    ends
}

/// Splits `text[range]` at Unicode word boundaries (UAX #29).
///
/// Breaks a whitespace-free run such as a URL at its punctuation, and
/// ideographic text between characters. Whitespace stays with the piece
/// before it.
///
/// # Examples
///
/// ```
/// use ctx_chunker::text::subword_spans;
///
/// let text = "docs.rs/regex ok";
/// let spans = subword_spans(text, 0..text.len());
/// let parts: Vec<&str> = spans.into_iter().map(|r| &text[r]).collect();
/// assert_eq!(parts.concat(), text);
/// assert!(parts.len() > 2);
/// ```
#[must_use]
pub fn subword_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let ends = folded_ends(range.start, text[range.clone()].split_word_bound_indices());
    spans_from_ends(range, ends)
}

/// Splits `text[range]` into extended grapheme clusters.
///
/// Whitespace stays with the cluster before it.
#[must_use]
pub fn grapheme_spans(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let ends = folded_ends(range.start, text[range.clone()].grapheme_indices(true));
    spans_from_ends(range, ends)
}

fn trimmed_parts(text: &str, spans: Vec<Range<usize>>) -> Vec<&str> {
    spans
        .into_iter()
        .map(|span| text[span].trim())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Splits text into trimmed sentences ending in their terminator.
///
/// # Examples
///
/// ```
/// use ctx_chunker::text::split_sentences;
///
/// let sentences = split_sentences("Hello world. How are you? I am fine!");
/// assert_eq!(sentences, vec!["Hello world.", "How are you?", "I am fine!"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    trimmed_parts(text, sentence_spans(text, 0..text.len()))
}

/// Splits text into trimmed, non-empty paragraphs.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    trimmed_parts(text, paragraph_spans(text, 0..text.len()))
}

/// Truncates a string at a grapheme cluster boundary.
///
/// # Arguments
///
/// * `s` - The string to truncate.
/// * `max_graphemes` - Maximum number of grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let end_byte = s
        .grapheme_indices(true)
        .nth(max_graphemes)
        .map_or(s.len(), |(offset, _)| offset);
    &s[..end_byte]
}
