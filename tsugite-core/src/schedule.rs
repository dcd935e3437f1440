//! Priority-ordered schedule of candidate merges.
//!
//! Entries are immutable snapshots of an edge taken when it was pushed. The
//! schedule never updates or removes entries in place; the driver discards
//! entries whose recorded weight no longer matches the graph when they are
//! popped.

use std::{cmp::Ordering, collections::BinaryHeap};

/// Snapshot `(priority, u, v, weight)` of a candidate merge, with `u < v`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    priority: f64,
    u: usize,
    v: usize,
    weight: f64,
}

impl Entry {
    /// Records a candidate, normalising the endpoint order.
    pub(crate) fn new(priority: f64, a: usize, b: usize, weight: f64) -> Self {
        let (u, v) = if a <= b { (a, b) } else { (b, a) };
        Self {
            priority,
            u,
            v,
            weight,
        }
    }

    #[rustfmt::skip]
    pub(crate) fn priority(&self) -> f64 { self.priority }

    #[rustfmt::skip]
    pub(crate) fn u(&self) -> usize { self.u }

    #[rustfmt::skip]
    pub(crate) fn v(&self) -> usize { self.v }

    #[rustfmt::skip]
    pub(crate) fn weight(&self) -> f64 { self.weight }
}

impl Eq for Entry {}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Greater entries are popped first: higher priority, then higher weight,
/// then the smaller `u`, then the smaller `v`.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.weight.total_cmp(&other.weight))
            .then_with(|| other.u.cmp(&self.u))
            .then_with(|| other.v.cmp(&self.v))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-priority queue of [`Entry`] values tolerating stale duplicates.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    heap: BinaryHeap<Entry>,
    pushed: usize,
}

impl Schedule {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.pushed = self.pushed.saturating_add(1);
        self.heap.push(entry);
    }

    /// Removes and returns the best entry.
    pub(crate) fn pop_max(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    #[rustfmt::skip]
    pub(crate) fn len(&self) -> usize { self.heap.len() }

    /// Total number of entries ever pushed.
    #[rustfmt::skip]
    pub(crate) fn pushed(&self) -> usize { self.pushed }
}
