//! Seeded signed graphs with a planted clustering.
//!
//! Every vertex is assigned to one of `cluster_count` hidden clusters. Edges
//! are sampled uniformly at random; an edge inside a hidden cluster is
//! attractive and an edge across clusters is repulsive, except that each
//! sign is flipped with probability `flip_probability`. Flipped signs create
//! the conflicts that separate the lookahead variant from the plain one.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tsugite_core::Instance;

/// Configuration for [`planted_instance`].
#[derive(Clone, Debug)]
pub struct SignedGraphConfig {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of sampled edges per vertex. Self-loop samples are dropped, so
    /// the final edge count may be slightly lower.
    pub edges_per_vertex: usize,
    /// Number of hidden clusters.
    pub cluster_count: usize,
    /// Probability of flipping an edge's sign away from the hidden clustering.
    pub flip_probability: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Errors raised for invalid generator configurations.
#[derive(Debug, Error, PartialEq)]
pub enum SyntheticError {
    /// The graph must have at least one vertex.
    #[error("vertex count must be positive")]
    ZeroVertices,
    /// At least one hidden cluster is required.
    #[error("cluster count must be positive")]
    ZeroClusters,
    /// More hidden clusters than vertices were requested.
    #[error("cluster count {cluster_count} exceeds vertex count {vertex_count}")]
    ClusterCountExceedsVertexCount {
        /// Requested hidden clusters.
        cluster_count: usize,
        /// Requested vertices.
        vertex_count: usize,
    },
    /// The flip probability is outside `[0, 1]`.
    #[error("flip probability must lie in [0, 1] (got {got})")]
    InvalidFlipProbability {
        /// The rejected probability.
        got: f64,
    },
}

/// Generates the instance described by `config`.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is invalid.
///
/// # Examples
/// ```
/// use tsugite_benches::source::{SignedGraphConfig, planted_instance};
///
/// let instance = planted_instance(&SignedGraphConfig {
///     vertex_count: 50,
///     edges_per_vertex: 4,
///     cluster_count: 5,
///     flip_probability: 0.1,
///     seed: 9,
/// })?;
/// assert_eq!(instance.vertex_count(), 50);
/// assert!(instance.edge_count() <= 200);
/// # Ok::<(), tsugite_benches::source::SyntheticError>(())
/// ```
pub fn planted_instance(config: &SignedGraphConfig) -> Result<Instance, SyntheticError> {
    validate(config)?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let vertex_count = config.vertex_count;

    let hidden: Vec<usize> = (0..vertex_count)
        .map(|_| rng.gen_range(0..config.cluster_count))
        .collect();

    let samples = vertex_count.saturating_mul(config.edges_per_vertex);
    let mut edges = Vec::with_capacity(samples);
    let mut weights = Vec::with_capacity(samples);
    for _ in 0..samples {
        let a = rng.gen_range(0..vertex_count);
        let b = rng.gen_range(0..vertex_count);
        if a == b {
            continue;
        }
        let together = hidden.get(a) == hidden.get(b);
        let flipped = rng.gen_bool(config.flip_probability);
        let weight = if together == flipped {
            rng.gen_range(-1.0..-0.1)
        } else {
            rng.gen_range(0.1..1.0)
        };
        edges.push([a, b]);
        weights.push(weight);
    }

    Ok(Instance::new(
        format!("planted-{vertex_count}-{}", config.seed),
        vertex_count,
        edges,
        weights,
    ))
}

fn validate(config: &SignedGraphConfig) -> Result<(), SyntheticError> {
    if config.vertex_count == 0 {
        return Err(SyntheticError::ZeroVertices);
    }
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.vertex_count {
        return Err(SyntheticError::ClusterCountExceedsVertexCount {
            cluster_count: config.cluster_count,
            vertex_count: config.vertex_count,
        });
    }
    if !(0.0..=1.0).contains(&config.flip_probability) {
        return Err(SyntheticError::InvalidFlipProbability {
            got: config.flip_probability,
        });
    }
    Ok(())
}
