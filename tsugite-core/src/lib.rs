//! Tsugite core library.
//!
//! Greedy edge contraction for weighted correlation clustering. The solver
//! loads a signed, undirected edge list into a [`DynamicGraph`], schedules
//! every positive edge as a merge candidate, and repeatedly contracts the
//! best-scoring candidate until no positive edge remains.
//!
//! # Variants
//!
//! - [`Variant::Plain`] ranks candidates by their accumulated weight.
//! - [`Variant::Lookahead`] ranks candidates by weight divided by the
//!   [`regret`] of the merge: the conflicting neighbour weight the merge
//!   would force into one cluster.
//!
//! # Determinism
//!
//! Input weights receive a tiny uniform jitter once at load time so exact
//! ties do not degrade the schedule. The jitter is drawn from an RNG owned by
//! the solve call; fixing the seed with
//! [`GreedyJoiningBuilder::with_seed`] makes runs reproducible.
//!
//! ```
//! use tsugite_core::{GreedyJoiningBuilder, Instance};
//!
//! let instance = Instance::new(
//!     "triangle",
//!     3,
//!     vec![[0, 1], [1, 2], [0, 2]],
//!     vec![5.0, 3.0, -10.0],
//! );
//! let joining = GreedyJoiningBuilder::new()
//!     .with_seed(7)
//!     .with_noise_amplitude(0.0)
//!     .build()?;
//! let solution = joining.solve_instance(&instance)?;
//! assert_eq!(solution.cluster_count(), 2);
//! assert_eq!(solution.objective(), 5.0);
//! # Ok::<(), tsugite_core::JoiningError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod driver;
mod error;
mod graph;
mod instance;
mod jitter;
mod joining;
mod observer;
mod partition;
mod result;
mod schedule;
mod score;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{GreedyJoiningBuilder, Orientation, Variant},
    error::{JoiningError, JoiningErrorCode, Result},
    graph::DynamicGraph,
    instance::Instance,
    jitter::{DEFAULT_NOISE_AMPLITUDE, MAX_NOISE_AMPLITUDE},
    joining::GreedyJoining,
    observer::{MergeEvent, MergeObserver, NoopObserver},
    partition::Partition,
    result::{ClusterId, ClusteringResult, JoiningSolution, Termination},
    score::{LOOKAHEAD_SENTINEL, LookaheadScore, PriorityScore, WeightScore, regret},
};
