//! Shared test utilities for `tsugite-core`.

use proptest::test_runner::Config as ProptestConfig;
use tsugite_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{builder::Orientation, driver::Driver, graph::DynamicGraph, score::PriorityScore};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `TSUGITE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds an unperturbed graph from `(u, v, weight)` triples.
pub(crate) fn graph_from(vertex_count: usize, edges: &[(usize, usize, f64)]) -> DynamicGraph {
    let mut graph = DynamicGraph::new(vertex_count);
    for &(u, v, weight) in edges {
        graph.accumulate(u, v, weight);
    }
    graph
}

/// Runs the driver to completion and collects every merge event.
pub(crate) fn run_recording<S: PriorityScore>(
    graph: DynamicGraph,
    score: &S,
    orientation: Orientation,
    max_merges: Option<usize>,
) -> (crate::driver::Outcome, Vec<crate::MergeEvent>) {
    let mut events = Vec::new();
    let outcome = Driver::new(graph, score, orientation, max_merges)
        .run(&mut |event: &crate::MergeEvent| events.push(*event));
    (outcome, events)
}
