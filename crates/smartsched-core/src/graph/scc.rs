//! Strongly connected components (Kosaraju) and condensation.
//!
//! # Algorithm
//!
//! 1. **Finish order**: visit vertices `0..V` in ascending id order; from
//!    each unvisited vertex run a DFS over forward adjacency and push every
//!    vertex onto a stack as it finishes.
//! 2. **Reverse sweep**: pop the stack; each popped vertex not yet assigned
//!    starts a DFS over reverse adjacency, and every vertex it reaches forms
//!    one component.
//!
//! Both passes use an explicit `(vertex, next-neighbor)` work stack, so the
//! finish order and the member order inside each component match a recursive
//! DFS exactly without being limited by call-stack depth.
//!
//! Components are emitted in pop order (decreasing finish time of their first
//! member), not sorted by vertex id.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::model::{Graph, Weight};
use crate::metrics::{Instrumented, Metrics, MetricsSnapshot};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Partition of the vertex set into strongly connected components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SccResult {
    /// Components in discovery (pop) order; members in reverse-DFS preorder.
    pub components: Vec<Vec<usize>>,
    /// Diagnostics for the run that produced this partition.
    pub metrics: MetricsSnapshot,
}

impl SccResult {
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Map each vertex to the index of its component.
    ///
    /// `vertex_count` must match the graph the partition came from.
    #[must_use]
    pub fn component_ids(&self, vertex_count: usize) -> Vec<usize> {
        component_ids(&self.components, vertex_count)
    }

    /// Components with more than one member (dependency cycles).
    pub fn cyclic_components(&self) -> impl Iterator<Item = &[usize]> {
        self.components
            .iter()
            .filter(|c| c.len() > 1)
            .map(Vec::as_slice)
    }
}

/// How crossing-edge weights are folded into a single condensation edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CondensationWeight {
    /// Every condensation edge weighs 1 (pure reachability graph).
    #[default]
    Unit,
    /// Smallest crossing weight.
    Min,
    /// Largest crossing weight.
    Max,
    /// Sum over all crossing edge slots.
    Sum,
}

impl CondensationWeight {
    const fn fold(self, acc: Weight, weight: Weight) -> Weight {
        match self {
            Self::Unit => 1,
            Self::Min => if weight < acc { weight } else { acc },
            Self::Max => if weight > acc { weight } else { acc },
            Self::Sum => acc.saturating_add(weight),
        }
    }
}

impl fmt::Display for CondensationWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
            Self::Sum => write!(f, "sum"),
        }
    }
}

impl FromStr for CondensationWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unit" => Ok(Self::Unit),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "sum" => Ok(Self::Sum),
            other => Err(format!(
                "unknown condensation weight '{other}' (expected unit, min, max or sum)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// SccFinder
// ---------------------------------------------------------------------------

/// Kosaraju SCC finder over a borrowed [`Graph`].
#[derive(Debug)]
pub struct SccFinder<'g> {
    graph: &'g Graph,
    metrics: Metrics,
}

impl Instrumented for SccFinder<'_> {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }
}

impl<'g> SccFinder<'g> {
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            metrics: Metrics::new(),
        }
    }

    /// Partition the graph's vertices into strongly connected components.
    pub fn find_sccs(&mut self) -> SccResult {
        self.reset();
        let n = self.graph.vertex_count();

        let mut visited = FixedBitSet::with_capacity(n);
        let mut finished: Vec<usize> = Vec::with_capacity(n);
        for start in 0..n {
            if !visited.contains(start) {
                self.finish_order_from(start, &mut visited, &mut finished);
            }
            self.increment_operation_count(1);
        }

        let mut assigned = FixedBitSet::with_capacity(n);
        let mut components: Vec<Vec<usize>> = Vec::new();
        while let Some(vertex) = finished.pop() {
            if !assigned.contains(vertex) {
                components.push(self.collect_component(vertex, &mut assigned));
            }
            self.increment_operation_count(1);
        }

        debug!(
            vertices = n,
            components = components.len(),
            operations = self.operation_count(),
            "scc partition computed"
        );

        SccResult {
            components,
            metrics: self.metrics.snapshot(),
        }
    }

    /// Collapse each component of `partition` to one vertex, with unit
    /// weights on the crossing edges.
    ///
    /// `partition` must cover every vertex of the graph exactly once.
    pub fn build_condensation_graph(&mut self, partition: &[Vec<usize>]) -> Graph {
        self.build_condensation_graph_with(partition, CondensationWeight::Unit)
    }

    /// Collapse each component of `partition` to one vertex, folding the
    /// weights of crossing edges with `policy`.
    ///
    /// Condensation edges are added in the order their first crossing edge
    /// is met (ascending source vertex, then adjacency order). Intra-component
    /// edges are dropped, so the result never has self-loops.
    pub fn build_condensation_graph_with(
        &mut self,
        partition: &[Vec<usize>],
        policy: CondensationWeight,
    ) -> Graph {
        self.reset();
        let n = self.graph.vertex_count();

        let ids = component_ids(partition, n);
        self.increment_operation_count(n as u64);

        let mut first_seen: Vec<(usize, usize)> = Vec::new();
        let mut folded: HashMap<(usize, usize), Weight> = HashMap::new();

        for u in 0..n {
            for &v in self.graph.adjacent(u) {
                let (cu, cv) = (ids[u], ids[v]);
                if cu != cv {
                    let weight = match policy {
                        CondensationWeight::Unit => 1,
                        _ => self.graph.weight(u, v).unwrap_or_default(),
                    };
                    match folded.entry((cu, cv)) {
                        Entry::Vacant(slot) => {
                            slot.insert(weight);
                            first_seen.push((cu, cv));
                        }
                        Entry::Occupied(mut slot) => {
                            let acc = *slot.get();
                            slot.insert(policy.fold(acc, weight));
                        }
                    }
                }
                self.increment_operation_count(1);
            }
        }

        let mut condensed = Graph::new(partition.len());
        for pair in first_seen {
            if let Some(&weight) = folded.get(&pair) {
                condensed.add_edge(pair.0, pair.1, weight);
            }
        }

        debug!(
            components = partition.len(),
            edges = condensed.edge_count(),
            %policy,
            "condensation graph built"
        );

        condensed
    }

    fn finish_order_from(&mut self, start: usize, visited: &mut FixedBitSet, finished: &mut Vec<usize>) {
        let graph = self.graph;
        visited.insert(start);
        self.increment_operation_count(1);

        let mut work: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(frame) = work.last_mut() {
            let (vertex, next) = *frame;
            if let Some(&neighbor) = graph.adjacent(vertex).get(next) {
                frame.1 += 1;
                self.increment_operation_count(1);
                if !visited.contains(neighbor) {
                    visited.insert(neighbor);
                    self.increment_operation_count(1);
                    work.push((neighbor, 0));
                }
            } else {
                work.pop();
                finished.push(vertex);
            }
        }
    }

    fn collect_component(&mut self, start: usize, assigned: &mut FixedBitSet) -> Vec<usize> {
        let graph = self.graph;
        let mut component = vec![start];
        assigned.insert(start);
        self.increment_operation_count(1);

        let mut work: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(frame) = work.last_mut() {
            let (vertex, next) = *frame;
            if let Some(&neighbor) = graph.reverse_adjacent(vertex).get(next) {
                frame.1 += 1;
                self.increment_operation_count(1);
                if !assigned.contains(neighbor) {
                    assigned.insert(neighbor);
                    component.push(neighbor);
                    self.increment_operation_count(1);
                    work.push((neighbor, 0));
                }
            } else {
                work.pop();
            }
        }

        component
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map each vertex to the index of the partition group containing it.
///
/// Vertices missing from `partition` map to group 0.
#[must_use]
pub fn component_ids(partition: &[Vec<usize>], vertex_count: usize) -> Vec<usize> {
    let mut ids = vec![0; vertex_count];
    for (idx, group) in partition.iter().enumerate() {
        for &vertex in group {
            ids[vertex] = idx;
        }
    }
    ids
}

/// Expand an order over components into an order over original vertices.
///
/// Members of each component keep their order inside the partition.
#[must_use]
pub fn expand_component_order(partition: &[Vec<usize>], component_order: &[usize]) -> Vec<usize> {
    component_order
        .iter()
        .filter_map(|&c| partition.get(c))
        .flat_map(|members| members.iter().copied())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
