//! Progress reporting hooks for the contraction loop.

/// Snapshot emitted after each executed merge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeEvent {
    /// One-based count of merges executed so far.
    pub iteration: usize,
    /// Vertex that survives the merge.
    pub stable: usize,
    /// Vertex absorbed into `stable`.
    pub merged: usize,
    /// Weight of the contracted edge.
    pub weight: f64,
    /// Accumulated objective after this merge.
    pub cost: f64,
    /// Number of clusters remaining after this merge.
    pub clusters: usize,
}

/// Receives a [`MergeEvent`] once per executed merge.
///
/// Observers cannot influence the run; the solver produces the same
/// partition with or without one.
///
/// # Examples
/// ```
/// use tsugite_core::{GreedyJoiningBuilder, Instance, MergeEvent};
///
/// let instance = Instance::new("pair", 2, vec![[0, 1]], vec![1.0]);
/// let joining = GreedyJoiningBuilder::new().with_seed(1).build()?;
/// let mut clusters = Vec::new();
/// joining.solve_with_observer(&instance, &mut |event: &MergeEvent| {
///     clusters.push(event.clusters);
/// })?;
/// assert_eq!(clusters, vec![1]);
/// # Ok::<(), tsugite_core::JoiningError>(())
/// ```
pub trait MergeObserver {
    /// Called after the partition has absorbed `event.merged`.
    fn on_merge(&mut self, event: &MergeEvent);
}

impl<F> MergeObserver for F
where
    F: FnMut(&MergeEvent),
{
    fn on_merge(&mut self, event: &MergeEvent) {
        self(event);
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {
    fn on_merge(&mut self, _event: &MergeEvent) {}
}
