//! Greedy contraction loop.
//!
//! The driver owns the graph, the schedule and the partition for the
//! lifetime of one solve. Each iteration pops the best entry, drops it if it
//! is stale, and otherwise contracts the edge:
//!
//! 1. pick the stable and merged endpoints via [`Orientation`];
//! 2. add the edge weight to the objective and merge the partition sets;
//! 3. fold every other edge of the merged vertex into the stable vertex;
//! 4. remove the merged vertex from the graph;
//! 5. rescore every rewired edge that ended up positive and push it.
//!
//! Rescoring happens after the removal so priorities are computed on the
//! contracted graph. The loop stops when the schedule is empty or when the
//! optional merge limit is reached; the partition is consistent at every
//! iteration boundary.

pub(crate) mod load;

use tracing::{debug, trace};

use crate::{
    builder::Orientation,
    graph::DynamicGraph,
    observer::{MergeEvent, MergeObserver},
    partition::Partition,
    result::{ClusteringResult, Termination},
    schedule::{Entry, Schedule},
    score::PriorityScore,
};

/// Final state of a contraction run.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) cost: f64,
    pub(crate) clustering: ClusteringResult,
    pub(crate) merges: usize,
    pub(crate) stale: usize,
    pub(crate) termination: Termination,
}

pub(crate) struct Driver<'s, S: ?Sized> {
    graph: DynamicGraph,
    schedule: Schedule,
    partition: Partition,
    score: &'s S,
    orientation: Orientation,
    max_merges: Option<usize>,
    cost: f64,
    merges: usize,
    stale: usize,
}

impl<'s, S: PriorityScore + ?Sized> Driver<'s, S> {
    /// Takes ownership of `graph` and schedules every positive edge.
    pub(crate) fn new(
        graph: DynamicGraph,
        score: &'s S,
        orientation: Orientation,
        max_merges: Option<usize>,
    ) -> Self {
        let partition = Partition::new(graph.vertex_count());
        let mut driver = Self {
            graph,
            schedule: Schedule::new(),
            partition,
            score,
            orientation,
            max_merges,
            cost: 0.0,
            merges: 0,
            stale: 0,
        };
        driver.seed_schedule();
        driver
    }

    fn seed_schedule(&mut self) {
        let candidates: Vec<(usize, usize, f64)> = self
            .graph
            .edges()
            .filter(|&(_, _, weight)| weight > 0.0)
            .collect();
        for (u, v, weight) in candidates {
            self.schedule_candidate(u, v, weight);
        }
        debug!(
            candidates = self.schedule.len(),
            edges = self.graph.edge_count(),
            "schedule seeded"
        );
    }

    fn schedule_candidate(&mut self, u: usize, v: usize, weight: f64) {
        let priority = self.score.score(&self.graph, u, v, weight);
        self.schedule.push(Entry::new(priority, u, v, weight));
    }

    /// Runs the loop to completion, reporting each merge to `observer`.
    pub(crate) fn run<O: MergeObserver + ?Sized>(mut self, observer: &mut O) -> Outcome {
        let termination = loop {
            let Some(entry) = self.schedule.pop_max() else {
                break Termination::Exhausted;
            };
            if !self.graph.is_current(entry.u(), entry.v(), entry.weight()) {
                self.stale += 1;
                continue;
            }
            if self.max_merges.is_some_and(|limit| self.merges >= limit) {
                break Termination::MergeLimit;
            }
            let event = self.contract(entry);
            observer.on_merge(&event);
        };

        let labels = self.partition.element_labeling();
        let clustering = ClusteringResult::from_dense_labels(&labels, self.partition.number_of_sets());
        debug!(
            merges = self.merges,
            stale = self.stale,
            pushed = self.schedule.pushed(),
            clusters = clustering.cluster_count(),
            cost = self.cost,
            termination = ?termination,
            "contraction finished"
        );

        Outcome {
            cost: self.cost,
            clustering,
            merges: self.merges,
            stale: self.stale,
            termination,
        }
    }

    fn contract(&mut self, entry: Entry) -> MergeEvent {
        let (stable, merged) = self.orientation.resolve(&self.graph, entry.u(), entry.v());

        self.cost += entry.weight();
        self.partition.merge(stable, merged);
        self.merges += 1;

        let rewired: Vec<(usize, f64)> = self
            .graph
            .neighbours(merged)
            .filter(|&(neighbour, _)| neighbour != stable)
            .collect();
        let updated: Vec<(usize, f64)> = rewired
            .into_iter()
            .filter_map(|(neighbour, weight)| {
                self.graph
                    .accumulate(stable, neighbour, weight)
                    .map(|sum| (neighbour, sum))
            })
            .collect();
        self.graph.remove_vertex(merged);

        for (neighbour, weight) in updated {
            if weight > 0.0 {
                self.schedule_candidate(stable, neighbour, weight);
            }
        }

        trace!(
            stable,
            merged,
            priority = entry.priority(),
            weight = entry.weight(),
            clusters = self.partition.number_of_sets(),
            "merged"
        );

        MergeEvent {
            iteration: self.merges,
            stable,
            merged,
            weight: entry.weight(),
            cost: self.cost,
            clusters: self.partition.number_of_sets(),
        }
    }
}


#[cfg(test)]
mod property;
