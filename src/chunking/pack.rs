//! Greedy first-fit packing of units under a token budget.

use crate::tokens::TokenCounter;
use std::ops::Range;

/// An atomic span of text with its token cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Unit {
    pub span: Range<usize>,
    pub tokens: usize,
}

/// Measures each span with `counter`.
pub(crate) fn measure(text: &str, spans: Vec<Range<usize>>, counter: &TokenCounter) -> Vec<Unit> {
    spans
        .into_iter()
        .map(|span| Unit {
            tokens: counter.count(&text[span.clone()]),
            span,
        })
        .collect()
}

/// A run of consecutive units packed into one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    /// Indices into the unit slice.
    pub units: Range<usize>,
    /// Sum of the units' token costs.
    pub tokens: usize,
}

impl Group {
    /// Byte span from the first unit's start to the last unit's end.
    pub fn span(&self, units: &[Unit]) -> Range<usize> {
        units[self.units.start].span.start..units[self.units.end - 1].span.end
    }
}

/// Packs units into groups whose totals stay within `budget`.
///
/// First fit, no backtracking, no reordering. A group only exceeds the
/// budget when it holds a single unit that exceeds it alone.
pub(crate) fn pack(units: &[Unit], budget: usize) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut total: usize = 0;

    for (i, unit) in units.iter().enumerate() {
        if i > start && total.saturating_add(unit.tokens) > budget {
            groups.push(Group {
                units: start..i,
                tokens: total,
            });
            start = i;
            total = 0;
        }
        total = total.saturating_add(unit.tokens);
    }

    if start < units.len() {
        groups.push(Group {
            units: start..units.len(),
            tokens: total,
        });
    }

    groups
}
