//! Solve entry points for greedy joining.
//!
//! Provides the [`GreedyJoining`] runtime: it validates the input, applies
//! the tie-breaking jitter, and hands the graph to the contraction driver
//! with the configured priority function.

use tracing::{Span, field, instrument};

use crate::{
    Result,
    builder::{Orientation, Variant},
    driver::{Driver, load},
    instance::Instance,
    jitter::{Jitter, entropy_seed},
    observer::{MergeObserver, NoopObserver},
    result::JoiningSolution,
    score::{LookaheadScore, PriorityScore, WeightScore},
};

/// Configured greedy joining solver.
///
/// A `GreedyJoining` holds configuration only; every solve call builds and
/// owns its own graph, schedule, partition and RNG.
///
/// # Examples
/// ```
/// use tsugite_core::{GreedyJoiningBuilder, Variant};
///
/// let joining = GreedyJoiningBuilder::new()
///     .with_variant(Variant::Plain)
///     .with_seed(11)
///     .build()?;
/// let solution = joining.solve(4, &[[0, 1], [2, 3], [1, 2]], &[1.0, 1.0, -5.0])?;
/// assert_eq!(solution.cluster_count(), 2);
/// assert_eq!(solution.labels()[0], solution.labels()[1]);
/// assert_ne!(solution.labels()[1], solution.labels()[2]);
/// # Ok::<(), tsugite_core::JoiningError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedyJoining {
    variant: Variant,
    orientation: Orientation,
    seed: Option<u64>,
    noise_amplitude: f64,
    max_merges: Option<usize>,
}

impl GreedyJoining {
    pub(crate) fn new(
        variant: Variant,
        orientation: Orientation,
        seed: Option<u64>,
        noise_amplitude: f64,
        max_merges: Option<usize>,
    ) -> Self {
        Self {
            variant,
            orientation,
            seed,
            noise_amplitude,
            max_merges,
        }
    }

    /// Returns the configured variant.
    #[must_use]
    #[rustfmt::skip]
    pub fn variant(&self) -> Variant { self.variant }

    /// Returns the resolved orientation policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn orientation(&self) -> Orientation { self.orientation }

    /// Returns the pinned seed, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> Option<u64> { self.seed }

    /// Returns the jitter half-width.
    #[must_use]
    #[rustfmt::skip]
    pub fn noise_amplitude(&self) -> f64 { self.noise_amplitude }

    /// Returns the merge cap, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_merges(&self) -> Option<usize> { self.max_merges }

    /// Solves the instance given as raw parallel lists.
    ///
    /// # Errors
    /// Returns [`crate::JoiningError::EdgeWeightLengthMismatch`] when the
    /// lists differ in length, [`crate::JoiningError::VertexOutOfBounds`] when
    /// an edge leaves `0..vertex_count`, and
    /// [`crate::JoiningError::NonFiniteWeight`] for NaN or infinite weights.
    pub fn solve(
        &self,
        vertex_count: usize,
        edges: &[[usize; 2]],
        weights: &[f64],
    ) -> Result<JoiningSolution> {
        self.dispatch("anonymous", vertex_count, edges, weights, &mut NoopObserver)
    }

    /// Solves `instance` with the configured variant.
    ///
    /// # Errors
    /// See [`Self::solve`].
    pub fn solve_instance(&self, instance: &Instance) -> Result<JoiningSolution> {
        self.solve_with_observer(instance, &mut NoopObserver)
    }

    /// Solves `instance`, reporting every executed merge to `observer`.
    ///
    /// # Errors
    /// See [`Self::solve`].
    pub fn solve_with_observer<O: MergeObserver + ?Sized>(
        &self,
        instance: &Instance,
        observer: &mut O,
    ) -> Result<JoiningSolution> {
        self.dispatch(
            instance.name(),
            instance.vertex_count(),
            instance.edges(),
            instance.weights(),
            observer,
        )
    }

    /// Solves `instance` with a caller-supplied priority function instead of
    /// the configured variant's. Orientation, seed, jitter and merge cap still
    /// apply.
    ///
    /// # Errors
    /// See [`Self::solve`].
    ///
    /// # Examples
    /// ```
    /// use tsugite_core::{DynamicGraph, GreedyJoiningBuilder, Instance, NoopObserver, PriorityScore};
    ///
    /// /// Prefers the lightest positive edge.
    /// struct Reluctant;
    ///
    /// impl PriorityScore for Reluctant {
    ///     fn score(&self, _: &DynamicGraph, _: usize, _: usize, weight: f64) -> f64 {
    ///         -weight
    ///     }
    /// }
    ///
    /// let instance = Instance::new("path", 3, vec![[0, 1], [1, 2]], vec![1.0, 4.0]);
    /// let joining = GreedyJoiningBuilder::new().with_noise_amplitude(0.0).build()?;
    /// let solution = joining.solve_with_score(&instance, &Reluctant, &mut NoopObserver)?;
    /// assert_eq!(solution.cluster_count(), 1);
    /// assert_eq!(solution.objective(), 5.0);
    /// # Ok::<(), tsugite_core::JoiningError>(())
    /// ```
    pub fn solve_with_score<S, O>(
        &self,
        instance: &Instance,
        score: &S,
        observer: &mut O,
    ) -> Result<JoiningSolution>
    where
        S: PriorityScore + ?Sized,
        O: MergeObserver + ?Sized,
    {
        self.run(
            instance.name(),
            instance.vertex_count(),
            instance.edges(),
            instance.weights(),
            score,
            observer,
        )
    }

    fn dispatch<O: MergeObserver + ?Sized>(
        &self,
        name: &str,
        vertex_count: usize,
        edges: &[[usize; 2]],
        weights: &[f64],
        observer: &mut O,
    ) -> Result<JoiningSolution> {
        match self.variant {
            Variant::Plain => self.run(name, vertex_count, edges, weights, &WeightScore, observer),
            Variant::Lookahead => {
                self.run(name, vertex_count, edges, weights, &LookaheadScore, observer)
            }
        }
    }

    #[instrument(
        name = "core.solve",
        err,
        skip(self, edges, weights, score, observer),
        fields(
            instance = %name,
            vertices = vertex_count,
            edges = edges.len(),
            variant = self.variant.as_str(),
            orientation = self.orientation.as_str(),
            seed = field::Empty,
        ),
    )]
    fn run<S, O>(
        &self,
        name: &str,
        vertex_count: usize,
        edges: &[[usize; 2]],
        weights: &[f64],
        score: &S,
        observer: &mut O,
    ) -> Result<JoiningSolution>
    where
        S: PriorityScore + ?Sized,
        O: MergeObserver + ?Sized,
    {
        load::validate(vertex_count, edges, weights)?;

        let seed = self.seed.unwrap_or_else(entropy_seed);
        Span::current().record("seed", seed);

        let mut jitter = Jitter::new(self.noise_amplitude, seed);
        let graph = load::build_graph(vertex_count, edges, weights, &mut jitter);
        let outcome = Driver::new(graph, score, self.orientation, self.max_merges).run(observer);

        Ok(JoiningSolution::new(
            outcome.cost,
            outcome.clustering,
            outcome.merges,
            outcome.stale,
            seed,
            outcome.termination,
        ))
    }
}
