//! Property-based tests for the contraction driver.
//!
//! Random signed instances are solved end to end and checked for
//! reproducibility, objective bookkeeping, partition consistency with the
//! reported merges, and agreement between the variants on conflict-free
//! inputs. A separate property drives [`DynamicGraph`] through random
//! accumulate/remove sequences and checks adjacency symmetry.

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use test_strategy::Arbitrary;

use crate::{
    GreedyJoiningBuilder, Instance, JoiningSolution, MergeEvent, Orientation, Variant,
    graph::DynamicGraph, partition::Partition, test_utils::suite_proptest_config,
};

const MAX_VERTICES: usize = 24;

/// Sign structure of generated edge weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum WeightProfile {
    /// Uniform weights in `[-5, 5)`.
    #[weight(3)]
    Mixed,
    /// Only attractive edges; every connected component collapses.
    #[weight(2)]
    AllPositive,
    /// Only repulsive edges; nothing merges.
    #[weight(1)]
    AllNegative,
    /// `+1` or `-1` only, so every priority tie is broken by jitter or ids.
    #[weight(2)]
    Unit,
}

fn instance_strategy() -> impl Strategy<Value = Instance> {
    (any::<WeightProfile>(), any::<u64>()).prop_map(|(profile, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_instance(profile, &mut rng)
    })
}

/// Generates an instance with possible self-loops and parallel edges.
fn generate_instance(profile: WeightProfile, rng: &mut SmallRng) -> Instance {
    let vertex_count = rng.gen_range(1..=MAX_VERTICES);
    let edge_count = rng.gen_range(0..=3 * vertex_count);
    let mut edges = Vec::with_capacity(edge_count);
    let mut weights = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        edges.push([rng.gen_range(0..vertex_count), rng.gen_range(0..vertex_count)]);
        weights.push(match profile {
            WeightProfile::Mixed => rng.gen_range(-5.0..5.0),
            WeightProfile::AllPositive => rng.gen_range(0.1..5.0),
            WeightProfile::AllNegative => rng.gen_range(-5.0..-0.1),
            WeightProfile::Unit => {
                if rng.gen_bool(0.6) {
                    1.0
                } else {
                    -1.0
                }
            }
        });
    }
    Instance::new(format!("{profile:?}"), vertex_count, edges, weights)
}

fn solve_recording(
    instance: &Instance,
    variant: Variant,
    seed: u64,
) -> Result<(JoiningSolution, Vec<MergeEvent>), TestCaseError> {
    let joining = GreedyJoiningBuilder::new()
        .with_variant(variant)
        .with_seed(seed)
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let mut events = Vec::new();
    let solution = joining
        .solve_with_observer(instance, &mut |event: &MergeEvent| events.push(*event))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    Ok((solution, events))
}

fn dense_labels(solution: &JoiningSolution) -> Vec<usize> {
    solution
        .labels()
        .iter()
        .map(|id| usize::try_from(id.get()).unwrap_or(usize::MAX))
        .collect()
}

/// Solving twice with one seed yields identical solutions and merge traces.
fn run_determinism_property(instance: &Instance, variant: Variant, seed: u64) -> TestCaseResult {
    let (first, first_events) = solve_recording(instance, variant, seed)?;
    let (second, second_events) = solve_recording(instance, variant, seed)?;
    prop_assert_eq!(first, second);
    prop_assert_eq!(first_events, second_events);
    Ok(())
}

/// The objective, merge count and cluster count agree with the merge trace,
/// and replaying the merges on a fresh partition reproduces the labels.
fn run_bookkeeping_property(instance: &Instance, variant: Variant, seed: u64) -> TestCaseResult {
    let (solution, events) = solve_recording(instance, variant, seed)?;
    let vertex_count = instance.vertex_count();

    prop_assert_eq!(solution.labels().len(), vertex_count);
    prop_assert_eq!(solution.merges(), events.len());
    prop_assert_eq!(solution.cluster_count(), vertex_count - solution.merges());

    let mut replay = Partition::new(vertex_count);
    let mut cost = 0.0;
    for (index, event) in events.iter().enumerate() {
        prop_assert!(event.weight > 0.0, "merged non-positive edge: {event:?}");
        prop_assert_eq!(event.iteration, index + 1);
        prop_assert!(replay.merge(event.stable, event.merged));
        cost += event.weight;
        prop_assert_eq!(event.cost, cost);
        prop_assert_eq!(event.clusters, replay.number_of_sets());
    }
    prop_assert_eq!(solution.objective(), cost);
    prop_assert_eq!(dense_labels(&solution), replay.element_labeling());
    Ok(())
}

/// Repulsive-only instances stay as singletons.
fn run_all_negative_property(instance: &Instance, variant: Variant, seed: u64) -> TestCaseResult {
    let (solution, events) = solve_recording(instance, variant, seed)?;
    prop_assert!(events.is_empty());
    prop_assert_eq!(solution.objective(), 0.0);
    prop_assert_eq!(solution.cluster_count(), instance.vertex_count());
    Ok(())
}

/// Attractive-only instances collapse to their connected components, and
/// since no merge ever creates a conflict both variants take the same path
/// under a shared orientation.
fn run_conflict_free_property(instance: &Instance, seed: u64) -> TestCaseResult {
    let mut components = Partition::new(instance.vertex_count());
    for &[a, b] in instance.edges() {
        components.merge(a, b);
    }

    let solve = |variant: Variant| {
        GreedyJoiningBuilder::new()
            .with_variant(variant)
            .with_orientation(Orientation::Fixed)
            .with_seed(seed)
            .build()
            .and_then(|joining| joining.solve_instance(instance))
            .map_err(|err| TestCaseError::fail(err.to_string()))
    };
    let plain = solve(Variant::Plain)?;
    let lookahead = solve(Variant::Lookahead)?;

    prop_assert_eq!(plain.cluster_count(), components.number_of_sets());
    prop_assert_eq!(dense_labels(&plain), components.element_labeling());
    prop_assert_eq!(plain, lookahead);
    Ok(())
}

/// Graph mutation step for the symmetry property.
#[derive(Clone, Copy, Debug)]
enum GraphOp {
    Accumulate(usize, usize, f64),
    Remove(usize),
}

fn graph_ops_strategy() -> impl Strategy<Value = (usize, Vec<GraphOp>)> {
    (2..=12usize).prop_flat_map(|vertex_count| {
        let op = prop_oneof![
            4 => (0..vertex_count, 0..vertex_count, -4.0..4.0f64)
                .prop_map(|(a, b, w)| GraphOp::Accumulate(a, b, w)),
            1 => (0..vertex_count).prop_map(GraphOp::Remove),
        ];
        (Just(vertex_count), prop::collection::vec(op, 0..64))
    })
}

fn run_symmetry_property(vertex_count: usize, ops: &[GraphOp]) -> TestCaseResult {
    let mut graph = DynamicGraph::new(vertex_count);
    for &op in ops {
        match op {
            GraphOp::Accumulate(a, b, weight) => {
                let valid = a != b && graph.is_alive(a) && graph.is_alive(b);
                prop_assert_eq!(graph.accumulate(a, b, weight).is_some(), valid);
            }
            GraphOp::Remove(vertex) => graph.remove_vertex(vertex),
        }
    }

    for vertex in 0..vertex_count {
        if !graph.is_alive(vertex) {
            prop_assert_eq!(graph.degree(vertex), 0);
        }
        for (neighbour, weight) in graph.neighbours(vertex) {
            prop_assert!(graph.is_alive(neighbour), "{vertex} points at dead {neighbour}");
            prop_assert_eq!(graph.weight(neighbour, vertex), Some(weight));
        }
    }
    let listed = graph.edges().count();
    prop_assert_eq!(listed, graph.edge_count());
    Ok(())
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Plain), Just(Variant::Lookahead)]
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn solve_is_deterministic_for_fixed_seed(
        instance in instance_strategy(),
        variant in variant_strategy(),
        seed in any::<u64>(),
    ) {
        run_determinism_property(&instance, variant, seed)?;
    }

    #[test]
    fn merge_trace_matches_solution(
        instance in instance_strategy(),
        variant in variant_strategy(),
        seed in any::<u64>(),
    ) {
        run_bookkeeping_property(&instance, variant, seed)?;
    }

    #[test]
    fn repulsive_instances_stay_singletons(seed in any::<u64>(), variant in variant_strategy()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let instance = generate_instance(WeightProfile::AllNegative, &mut rng);
        run_all_negative_property(&instance, variant, seed)?;
    }

    #[test]
    fn attractive_instances_collapse_components(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let instance = generate_instance(WeightProfile::AllPositive, &mut rng);
        run_conflict_free_property(&instance, seed)?;
    }

    #[test]
    fn graph_adjacency_stays_symmetric((vertex_count, ops) in graph_ops_strategy()) {
        run_symmetry_property(vertex_count, &ops)?;
    }
}

#[rstest::rstest]
#[case::mixed_42(WeightProfile::Mixed, 42)]
#[case::mixed_999(WeightProfile::Mixed, 999)]
#[case::unit_42(WeightProfile::Unit, 42)]
#[case::unit_7777(WeightProfile::Unit, 7777)]
#[case::positive_42(WeightProfile::AllPositive, 42)]
#[case::negative_42(WeightProfile::AllNegative, 42)]
fn bookkeeping_holds_for_pinned_instances(
    #[case] profile: WeightProfile,
    #[case] seed: u64,
    #[values(Variant::Plain, Variant::Lookahead)] variant: Variant,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let instance = generate_instance(profile, &mut rng);
    run_bookkeeping_property(&instance, variant, seed).expect("bookkeeping property holds");
    run_determinism_property(&instance, variant, seed).expect("determinism property holds");
}
