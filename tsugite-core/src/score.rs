//! Priority functions ranking candidate merges.
//!
//! The driver is parameterised by a [`PriorityScore`]; the two shipped
//! implementations correspond to the plain and lookahead variants.

use crate::graph::DynamicGraph;

/// Priority assigned by [`LookaheadScore`] to a positive edge whose merge
/// creates no conflict.
pub const LOOKAHEAD_SENTINEL: f64 = 1e20;

/// Scores a candidate merge of `{u, v}` whose current weight is `weight`.
///
/// Higher scores are scheduled first. Implementations must be pure functions
/// of their arguments so that a fixed seed yields a fixed run.
///
/// # Examples
/// ```
/// use tsugite_core::{DynamicGraph, PriorityScore};
///
/// struct Degree;
///
/// impl PriorityScore for Degree {
///     fn score(&self, graph: &DynamicGraph, u: usize, v: usize, weight: f64) -> f64 {
///         weight / (1 + graph.degree(u) + graph.degree(v)) as f64
///     }
/// }
///
/// let mut graph = DynamicGraph::new(2);
/// graph.accumulate(0, 1, 3.0);
/// assert_eq!(Degree.score(&graph, 0, 1, 3.0), 1.0);
/// ```
pub trait PriorityScore {
    /// Returns the priority of merging `u` and `v`.
    fn score(&self, graph: &DynamicGraph, u: usize, v: usize, weight: f64) -> f64;
}

/// Plain greedy joining: the priority is the edge weight itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeightScore;

impl PriorityScore for WeightScore {
    fn score(&self, _graph: &DynamicGraph, _u: usize, _v: usize, weight: f64) -> f64 {
        weight
    }
}

/// Lookahead greedy joining: the priority is `weight / regret(u, v)`, or
/// [`LOOKAHEAD_SENTINEL`] when the merge creates no conflict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookaheadScore;

impl PriorityScore for LookaheadScore {
    fn score(&self, graph: &DynamicGraph, u: usize, v: usize, weight: f64) -> f64 {
        let cost = regret(graph, u, v);
        if cost > 0.0 {
            weight / cost
        } else {
            LOOKAHEAD_SENTINEL
        }
    }
}

/// Sums the conflict a merge of `u` and `v` would create.
///
/// For every common neighbour `k` (other than `u` and `v`) where `w(u, k)` and
/// `w(v, k)` have opposite signs, the smaller magnitude of the two is added.
/// Both adjacency lists are walked once in increasing id order, so the cost
/// is `O(deg(u) + deg(v))`.
///
/// # Examples
/// ```
/// use tsugite_core::{DynamicGraph, regret};
///
/// let mut graph = DynamicGraph::new(3);
/// graph.accumulate(0, 1, 5.0);
/// graph.accumulate(0, 2, -10.0);
/// graph.accumulate(1, 2, 3.0);
/// assert_eq!(regret(&graph, 0, 1), 3.0);
/// ```
#[must_use]
pub fn regret(graph: &DynamicGraph, u: usize, v: usize) -> f64 {
    let mut left = graph.neighbours(u).filter(|&(k, _)| k != v).peekable();
    let mut right = graph.neighbours(v).filter(|&(k, _)| k != u).peekable();
    let mut total = 0.0;

    while let (Some(&(left_id, left_weight)), Some(&(right_id, right_weight))) =
        (left.peek(), right.peek())
    {
        match left_id.cmp(&right_id) {
            std::cmp::Ordering::Less => {
                left.next();
            }
            std::cmp::Ordering::Greater => {
                right.next();
            }
            std::cmp::Ordering::Equal => {
                if conflicting(left_weight, right_weight) {
                    total += left_weight.abs().min(right_weight.abs());
                }
                left.next();
                right.next();
            }
        }
    }

    total
}

fn conflicting(left: f64, right: f64) -> bool {
    (left > 0.0 && right < 0.0) || (left < 0.0 && right > 0.0)
}
