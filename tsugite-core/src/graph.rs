//! Dynamic weighted graph over a fixed arena of vertices.
//!
//! Each vertex owns an ordered map from neighbour id to accumulated edge
//! weight. The map is kept symmetric: whenever `a` records `b` with weight
//! `w`, `b` records `a` with the same `w`. Contracted vertices stay in the
//! arena with their liveness flag cleared and an empty adjacency.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
struct VertexSlot {
    alive: bool,
    adjacency: BTreeMap<usize, f64>,
}

/// Undirected graph whose vertices can be merged away.
///
/// Edge operations cost `O(log deg)`. Neighbour iteration is ordered by
/// neighbour id, which allows linear two-pointer walks over two adjacency
/// lists (see [`crate::regret`]).
///
/// # Examples
/// ```
/// use tsugite_core::DynamicGraph;
///
/// let mut graph = DynamicGraph::new(3);
/// graph.accumulate(0, 1, 2.0);
/// graph.accumulate(1, 0, 3.0);
/// assert_eq!(graph.weight(0, 1), Some(5.0));
/// assert_eq!(graph.weight(1, 0), Some(5.0));
///
/// graph.remove_vertex(1);
/// assert!(!graph.is_alive(1));
/// assert_eq!(graph.degree(0), 0);
/// ```
#[derive(Clone, Debug)]
pub struct DynamicGraph {
    slots: Vec<VertexSlot>,
}

impl DynamicGraph {
    /// Creates a graph with `vertex_count` alive, isolated vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        let slots = (0..vertex_count)
            .map(|_| VertexSlot {
                alive: true,
                adjacency: BTreeMap::new(),
            })
            .collect();
        Self { slots }
    }

    /// Returns the number of vertex slots, alive or not.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.slots.len() }

    /// Returns `true` while `vertex` has not been merged away.
    #[must_use]
    pub fn is_alive(&self, vertex: usize) -> bool {
        self.slots.get(vertex).is_some_and(|slot| slot.alive)
    }

    /// Returns the number of edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.slots
            .get(vertex)
            .map_or(0, |slot| slot.adjacency.len())
    }

    /// Returns whether the edge `{a, b}` exists.
    #[must_use]
    pub fn edge_exists(&self, a: usize, b: usize) -> bool {
        self.slots
            .get(a)
            .is_some_and(|slot| slot.adjacency.contains_key(&b))
    }

    /// Returns the current weight of `{a, b}`, or `None` when the edge does
    /// not exist.
    #[must_use]
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        self.slots
            .get(a)
            .and_then(|slot| slot.adjacency.get(&b))
            .copied()
    }

    /// Returns whether `{a, b}` exists and currently weighs exactly `weight`.
    ///
    /// Schedule entries are validated with this check: any accumulation on
    /// the edge after the entry was recorded makes the entry stale.
    #[must_use]
    pub fn is_current(&self, a: usize, b: usize, weight: f64) -> bool {
        self.weight(a, b) == Some(weight)
    }

    /// Iterates over `(neighbour, weight)` pairs of `vertex` in increasing
    /// neighbour order.
    pub fn neighbours(&self, vertex: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.slots
            .get(vertex)
            .into_iter()
            .flat_map(|slot| slot.adjacency.iter().map(|(&k, &w)| (k, w)))
    }

    /// Iterates over every edge once as `(u, v, weight)` with `u < v`, in
    /// lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.slots.iter().enumerate().flat_map(|(u, slot)| {
            slot.adjacency
                .range(u.saturating_add(1)..)
                .map(move |(&v, &w)| (u, v, w))
        })
    }

    /// Returns the number of edges between alive vertices.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Adds `weight` to the edge `{a, b}`, creating it when absent, and
    /// returns the resulting weight.
    ///
    /// Both directions are updated before the call returns. Returns `None`,
    /// leaving the graph untouched, when `a == b` or when either endpoint is
    /// out of range or has been merged away.
    pub fn accumulate(&mut self, a: usize, b: usize, weight: f64) -> Option<f64> {
        if a == b || !self.is_alive(a) || !self.is_alive(b) {
            return None;
        }
        let forward = self.slots.get_mut(a)?.adjacency.entry(b).or_insert(0.0);
        *forward += weight;
        let updated = *forward;
        self.slots.get_mut(b)?.adjacency.insert(a, updated);
        Some(updated)
    }

    /// Removes every edge incident to `vertex` and marks it as merged away.
    ///
    /// Removing a vertex twice is a no-op.
    pub fn remove_vertex(&mut self, vertex: usize) {
        let Some(slot) = self.slots.get_mut(vertex) else {
            return;
        };
        slot.alive = false;
        let adjacency = std::mem::take(&mut slot.adjacency);
        for neighbour in adjacency.keys() {
            if let Some(other) = self.slots.get_mut(*neighbour) {
                other.adjacency.remove(&vertex);
            }
        }
    }
}
