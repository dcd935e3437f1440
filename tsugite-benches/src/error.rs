//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use crate::source::SyntheticError;
use tsugite_core::JoiningError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Solver configuration failed.
    #[error("joining configuration failed: {0}")]
    Joining(#[from] JoiningError),
}
