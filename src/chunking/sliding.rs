//! Sliding-window segmentation.

use crate::chunking::ChunkingStrategy;
use crate::chunking::fallback::{Fallback, fallback_chain};
use crate::chunking::pack::{Unit, measure};
use crate::text::sentence_spans;
use crate::tokens::TokenCounter;
use std::collections::VecDeque;
use std::ops::Range;
use tracing::debug;

/// Computes overlapping window spans over `text`.
///
/// Sentences accumulate while the window total stays within `size`. When
/// the next sentence would not fit, the window is emitted and sentences are
/// dropped from its front until at most `overlap` tokens remain and the
/// next sentence fits. Sentences larger than `size` are first broken into
/// words, and words still larger than `size` into smaller pieces.
/// Requires `overlap < size`.
pub(crate) fn window_spans(
    text: &str,
    counter: &TokenCounter,
    size: usize,
    overlap: usize,
) -> Vec<Range<usize>> {
    let units = window_units(text, counter, size);
    let mut windows = Vec::new();
    let mut window: VecDeque<usize> = VecDeque::new();
    let mut total: usize = 0;

    for (i, unit) in units.iter().enumerate() {
        if !window.is_empty() && total.saturating_add(unit.tokens) > size {
            windows.push(span_of(&units, &window));

            while let Some(&front) = window.front() {
                if total <= overlap && total.saturating_add(unit.tokens) <= size {
                    break;
                }
                total -= units[front].tokens;
                window.pop_front();
            }
        }
        window.push_back(i);
        total = total.saturating_add(unit.tokens);
    }

    // The last unit pushed has never been emitted.
    if !window.is_empty() {
        windows.push(span_of(&units, &window));
    }

    debug!(
        units = units.len(),
        windows = windows.len(),
        size,
        overlap,
        "built sliding windows"
    );
    windows
}

/// Sentence units, with sentences larger than `size` refined through the
/// sliding-window fallback chain.
fn window_units(text: &str, counter: &TokenCounter, size: usize) -> Vec<Unit> {
    let chain = fallback_chain(&ChunkingStrategy::SlidingWindow { size, overlap: 0 });
    let mut units = Vec::new();
    for sentence in measure(text, sentence_spans(text, 0..text.len()), counter) {
        refine(text, sentence, counter, size, chain, &mut units);
    }
    units
}

fn refine(
    text: &str,
    unit: Unit,
    counter: &TokenCounter,
    size: usize,
    chain: &[Fallback],
    units: &mut Vec<Unit>,
) {
    let Some((&level, rest)) = chain.split_first().filter(|_| unit.tokens > size) else {
        units.push(unit);
        return;
    };
    match level.spans(text, unit.span.clone()) {
        Some(pieces) => {
            for piece in measure(text, pieces, counter) {
                refine(text, piece, counter, size, rest, units);
            }
        }
        None => units.push(unit),
    }
}

fn span_of(units: &[Unit], window: &VecDeque<usize>) -> Range<usize> {
    match (window.front(), window.back()) {
        (Some(&first), Some(&last)) => units[first].span.start..units[last].span.end,
        _ => 0..0,
    }
}
