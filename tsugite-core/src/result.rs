//! Result types for greedy joining.
//!
//! [`ClusteringResult`] carries the final cluster assignments;
//! [`JoiningSolution`] pairs them with the objective value and run
//! statistics.

/// Per-vertex cluster assignments with identifiers `0..cluster_count`,
/// numbered in order of first appearance over the vertices.
///
/// # Examples
/// ```
/// use tsugite_core::GreedyJoiningBuilder;
///
/// let solution = GreedyJoiningBuilder::new()
///     .with_noise_amplitude(0.0)
///     .build()?
///     .solve(4, &[[2, 3]], &[1.0])?;
/// let clustering = solution.clustering();
/// let ids: Vec<u64> = clustering.assignments().iter().map(|id| id.get()).collect();
/// assert_eq!(ids, vec![0, 1, 2, 2]);
/// assert_eq!(clustering.cluster_count(), 3);
/// # Ok::<(), tsugite_core::JoiningError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    assignments: Vec<ClusterId>,
    cluster_count: usize,
}

impl ClusteringResult {
    /// Builds a result from a labelling that is contiguous by construction.
    pub(crate) fn from_dense_labels(labels: &[usize], cluster_count: usize) -> Self {
        Self {
            assignments: labels.iter().map(|&label| ClusterId::new(label as u64)).collect(),
            cluster_count,
        }
    }

    /// Returns the assignments in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn assignments(&self) -> &[ClusterId] { &self.assignments }

    /// Counts how many distinct clusters exist within the assignments.
    #[must_use]
    #[rustfmt::skip]
    pub fn cluster_count(&self) -> usize { self.cluster_count }
}

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use tsugite_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }
}

/// Why the contraction loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The schedule ran empty: no positive edge remains.
    Exhausted,
    /// The configured merge limit was reached first. The partition is valid
    /// but may be coarsened further by a longer run.
    MergeLimit,
}

/// Outcome of a greedy joining run.
///
/// # Examples
/// ```
/// use tsugite_core::{GreedyJoiningBuilder, Instance, Termination};
///
/// let instance = Instance::new("pair", 3, vec![[0, 1]], vec![2.0]);
/// let solution = GreedyJoiningBuilder::new()
///     .with_noise_amplitude(0.0)
///     .build()?
///     .solve_instance(&instance)?;
/// assert_eq!(solution.objective(), 2.0);
/// assert_eq!(solution.merges(), 1);
/// assert_eq!(solution.cluster_count(), 2);
/// assert_eq!(solution.termination(), Termination::Exhausted);
/// # Ok::<(), tsugite_core::JoiningError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JoiningSolution {
    objective: f64,
    clustering: ClusteringResult,
    merges: usize,
    stale_entries: usize,
    seed: u64,
    termination: Termination,
}

impl JoiningSolution {
    pub(crate) fn new(
        objective: f64,
        clustering: ClusteringResult,
        merges: usize,
        stale_entries: usize,
        seed: u64,
        termination: Termination,
    ) -> Self {
        Self {
            objective,
            clustering,
            merges,
            stale_entries,
            seed,
            termination,
        }
    }

    /// Sum of the weights of all executed merges.
    #[must_use]
    #[rustfmt::skip]
    pub fn objective(&self) -> f64 { self.objective }

    /// Cluster assignments per vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn clustering(&self) -> &ClusteringResult { &self.clustering }

    /// Cluster label per vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[ClusterId] { self.clustering.assignments() }

    /// Number of final clusters.
    #[must_use]
    #[rustfmt::skip]
    pub fn cluster_count(&self) -> usize { self.clustering.cluster_count() }

    /// Number of executed merges.
    #[must_use]
    #[rustfmt::skip]
    pub fn merges(&self) -> usize { self.merges }

    /// Number of schedule entries discarded as stale.
    #[must_use]
    #[rustfmt::skip]
    pub fn stale_entries(&self) -> usize { self.stale_entries }

    /// Seed of the jitter RNG; passing it back through
    /// [`crate::GreedyJoiningBuilder::with_seed`] reproduces this run.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Why the run stopped.
    #[must_use]
    #[rustfmt::skip]
    pub fn termination(&self) -> Termination { self.termination }

    /// Splits the solution into `(objective, labels)`.
    #[must_use]
    pub fn into_parts(self) -> (f64, Vec<ClusterId>) {
        (self.objective, self.clustering.assignments)
    }
}
