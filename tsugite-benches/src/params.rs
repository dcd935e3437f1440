//! Benchmark parameter types.

use std::fmt;

use tsugite_core::Variant;

/// Parameters for one joining benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct JoiningBenchParams {
    /// Number of vertices in the generated graph.
    pub vertex_count: usize,
    /// Sampled edges per vertex.
    pub edges_per_vertex: usize,
    /// Priority function under test.
    pub variant: Variant,
}

impl fmt::Display for JoiningBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},deg={},variant={}",
            self.vertex_count,
            self.edges_per_vertex,
            self.variant.as_str()
        )
    }
}
