//! Builder utilities for configuring greedy joining.
//!
//! Exposes the variant and orientation selection surface and the validation
//! performed before constructing [`GreedyJoining`] instances.

use crate::{
    Result,
    error::JoiningError,
    graph::DynamicGraph,
    jitter::{DEFAULT_NOISE_AMPLITUDE, MAX_NOISE_AMPLITUDE},
    joining::GreedyJoining,
};

/// Selects the priority function used to rank candidate merges.
///
/// # Examples
/// ```
/// use tsugite_core::{Orientation, Variant};
///
/// assert_eq!(Variant::Plain.default_orientation(), Orientation::LargerDegree);
/// assert_eq!(Variant::Lookahead.default_orientation(), Orientation::Fixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Rank candidates by their accumulated weight.
    Plain,
    /// Rank candidates by weight divided by the conflict the merge creates.
    #[default]
    Lookahead,
}

impl Variant {
    /// Returns the orientation each variant uses unless overridden.
    #[must_use]
    pub const fn default_orientation(self) -> Orientation {
        match self {
            Self::Plain => Orientation::LargerDegree,
            Self::Lookahead => Orientation::Fixed,
        }
    }

    /// Returns a stable lowercase label for logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Lookahead => "lookahead",
        }
    }
}

/// Decides which endpoint of a contracted edge survives.
///
/// # Examples
/// ```
/// use tsugite_core::{DynamicGraph, Orientation};
///
/// let mut graph = DynamicGraph::new(4);
/// graph.accumulate(0, 1, 1.0);
/// graph.accumulate(1, 2, 1.0);
/// graph.accumulate(1, 3, 1.0);
///
/// assert_eq!(Orientation::Fixed.resolve(&graph, 0, 1), (0, 1));
/// assert_eq!(Orientation::LargerDegree.resolve(&graph, 0, 1), (1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Keep the endpoint with more incident edges so the smaller adjacency
    /// is rewired. Ties keep the smaller id.
    LargerDegree,
    /// Keep the smaller id.
    Fixed,
}

impl Orientation {
    /// Returns `(stable, merged)` for the edge `{u, v}` with `u < v`.
    #[must_use]
    pub fn resolve(self, graph: &DynamicGraph, u: usize, v: usize) -> (usize, usize) {
        match self {
            Self::LargerDegree if graph.degree(u) < graph.degree(v) => (v, u),
            Self::LargerDegree | Self::Fixed => (u, v),
        }
    }

    /// Returns a stable lowercase label for logs and summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LargerDegree => "larger-degree",
            Self::Fixed => "fixed",
        }
    }
}

/// Configures and constructs [`GreedyJoining`] instances.
///
/// # Examples
/// ```
/// use tsugite_core::{GreedyJoiningBuilder, Orientation, Variant};
///
/// let joining = GreedyJoiningBuilder::new()
///     .with_variant(Variant::Plain)
///     .with_seed(3)
///     .with_max_merges(Some(10))
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(joining.variant(), Variant::Plain);
/// assert_eq!(joining.orientation(), Orientation::LargerDegree);
/// assert_eq!(joining.seed(), Some(3));
/// assert_eq!(joining.max_merges(), Some(10));
/// ```
#[derive(Debug, Clone)]
pub struct GreedyJoiningBuilder {
    variant: Variant,
    orientation: Option<Orientation>,
    seed: Option<u64>,
    noise_amplitude: f64,
    max_merges: Option<usize>,
}

impl Default for GreedyJoiningBuilder {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            orientation: None,
            seed: None,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            max_merges: None,
        }
    }
}

impl GreedyJoiningBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tsugite_core::{DEFAULT_NOISE_AMPLITUDE, GreedyJoiningBuilder, Variant};
    ///
    /// let builder = GreedyJoiningBuilder::new();
    /// assert_eq!(builder.variant(), Variant::Lookahead);
    /// assert_eq!(builder.noise_amplitude(), DEFAULT_NOISE_AMPLITUDE);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the priority function.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Returns the configured variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Overrides the variant's default orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Returns the orientation that will be used, taking the variant default
    /// into account.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
            .unwrap_or_else(|| self.variant.default_orientation())
    }

    /// Pins the jitter RNG seed so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the pinned seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the half-width of the tie-breaking jitter; `0.0` disables it.
    #[must_use]
    pub fn with_noise_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    /// Returns the configured jitter half-width.
    #[must_use]
    pub fn noise_amplitude(&self) -> f64 {
        self.noise_amplitude
    }

    /// Caps the number of merges; `None` runs until no positive edge remains.
    #[must_use]
    pub fn with_max_merges(mut self, max_merges: Option<usize>) -> Self {
        self.max_merges = max_merges;
        self
    }

    /// Returns the configured merge cap.
    #[must_use]
    pub fn max_merges(&self) -> Option<usize> {
        self.max_merges
    }

    /// Validates the configuration and constructs a [`GreedyJoining`].
    ///
    /// # Errors
    /// Returns [`JoiningError::InvalidNoiseAmplitude`] when the jitter
    /// amplitude is negative, not a number, or above
    /// [`MAX_NOISE_AMPLITUDE`].
    ///
    /// # Examples
    /// ```
    /// use tsugite_core::{GreedyJoiningBuilder, JoiningError};
    ///
    /// let err = GreedyJoiningBuilder::new()
    ///     .with_noise_amplitude(-1.0)
    ///     .build()
    ///     .expect_err("negative amplitude is rejected");
    /// assert!(matches!(err, JoiningError::InvalidNoiseAmplitude { .. }));
    /// ```
    pub fn build(self) -> Result<GreedyJoining> {
        if !(0.0..=MAX_NOISE_AMPLITUDE).contains(&self.noise_amplitude) {
            return Err(JoiningError::InvalidNoiseAmplitude {
                got: self.noise_amplitude,
            });
        }

        Ok(GreedyJoining::new(
            self.variant,
            self.orientation(),
            self.seed,
            self.noise_amplitude,
            self.max_merges,
        ))
    }
}
