//! Input validation and graph construction.

use crate::{Result, error::JoiningError, graph::DynamicGraph, jitter::Jitter};

/// Checks the solve preconditions without building any state.
pub(crate) fn validate(vertex_count: usize, edges: &[[usize; 2]], weights: &[f64]) -> Result<()> {
    if edges.len() != weights.len() {
        return Err(JoiningError::EdgeWeightLengthMismatch {
            edges: edges.len(),
            weights: weights.len(),
        });
    }

    for (edge, (&[a, b], &weight)) in edges.iter().zip(weights).enumerate() {
        if let Some(vertex) = [a, b].into_iter().find(|&vertex| vertex >= vertex_count) {
            return Err(JoiningError::VertexOutOfBounds {
                edge,
                vertex,
                vertex_count,
            });
        }
        if !weight.is_finite() {
            return Err(JoiningError::NonFiniteWeight { edge, weight });
        }
    }

    Ok(())
}

/// Accumulates the perturbed input edges into a fresh graph.
///
/// Each edge draws exactly one jitter sample, in input order. Self-loops are
/// skipped after their draw so that adding or removing one does not shift the
/// noise applied to later edges.
pub(crate) fn build_graph(
    vertex_count: usize,
    edges: &[[usize; 2]],
    weights: &[f64],
    jitter: &mut Jitter,
) -> DynamicGraph {
    let mut graph = DynamicGraph::new(vertex_count);
    for (&[a, b], &weight) in edges.iter().zip(weights) {
        let perturbed = jitter.perturb(weight);
        if a != b {
            graph.accumulate(a, b, perturbed);
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{build_graph, validate};
    use crate::{error::JoiningError, jitter::Jitter};

    #[rstest]
    fn validate_accepts_well_formed_input() {
        assert!(validate(3, &[[0, 1], [2, 1]], &[1.0, -1.0]).is_ok());
        assert!(validate(0, &[], &[]).is_ok());
    }

    #[rstest]
    fn validate_rejects_length_mismatch() {
        let err = validate(2, &[[0, 1]], &[]).expect_err("lengths differ");
        assert_eq!(
            err,
            JoiningError::EdgeWeightLengthMismatch {
                edges: 1,
                weights: 0
            }
        );
    }

    #[rstest]
    #[case::first_endpoint([3, 0], 3)]
    #[case::second_endpoint([0, 7], 7)]
    fn validate_rejects_out_of_range_vertices(#[case] edge: [usize; 2], #[case] vertex: usize) {
        let err = validate(3, &[[0, 1], edge], &[1.0, 1.0]).expect_err("out of range");
        assert_eq!(
            err,
            JoiningError::VertexOutOfBounds {
                edge: 1,
                vertex,
                vertex_count: 3
            }
        );
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn validate_rejects_non_finite_weights(#[case] weight: f64) {
        let err = validate(2, &[[0, 1]], &[weight]).expect_err("non-finite");
        assert!(matches!(err, JoiningError::NonFiniteWeight { edge: 0, .. }));
    }

    #[rstest]
    fn build_graph_sums_parallel_edges_and_skips_loops() {
        let mut jitter = Jitter::new(0.0, 0);
        let graph = build_graph(3, &[[0, 1], [1, 0], [2, 2]], &[2.0, 3.0, 8.0], &mut jitter);
        assert_eq!(graph.weight(0, 1), Some(5.0));
        assert_eq!(graph.degree(2), 0);
        assert_eq!(graph.edge_count(), 1);
    }
}
