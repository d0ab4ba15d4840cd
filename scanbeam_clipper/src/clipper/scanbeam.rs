//! Sweep event queues: scanbeam y values and local minima.

use std::collections::BTreeSet;

/// A local minimum of the input: the pair of bounds starting at the same bottom vertex. Either
/// bound may be absent for open paths.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct LocalMinimum {
    pub y: i64,
    pub left_bound: Option<usize>,
    pub right_bound: Option<usize>,
}

/// Deduplicated set of y values where the sweep must stop, popped bottom (largest y) first.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scanbeam {
    ys: BTreeSet<i64>,
}

impl Scanbeam {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, y: i64) {
        self.ys.insert(y);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<i64> {
        self.ys.pop_last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }
}

/// Local minima in sweep order: largest y first, most recently added first among equal y.
#[derive(Debug, Clone, Default)]
pub(crate) struct MinimaQueue {
    minima: Vec<LocalMinimum>,
    current: usize,
}

impl MinimaQueue {
    pub fn new(added: &[LocalMinimum]) -> Self {
        let mut minima: Vec<_> = added.iter().rev().copied().collect();
        // stable sort keeps later additions ahead among equal y
        minima.sort_by(|a, b| b.y.cmp(&a.y));
        Self { minima, current: 0 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalMinimum> {
        self.minima.iter()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.current < self.minima.len()
    }

    /// Pop the next local minimum if it starts at `y`.
    #[inline]
    pub fn pop_at(&mut self, y: i64) -> Option<LocalMinimum> {
        let lm = *self.minima.get(self.current)?;
        if lm.y != y {
            return None;
        }
        self.current += 1;
        Some(lm)
    }
}
