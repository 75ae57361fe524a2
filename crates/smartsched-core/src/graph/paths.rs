//! Single-source shortest/longest distances and the critical path of a DAG.
//!
//! # Overview
//!
//! All computations relax edges in topological order, which gives exact
//! distances in `O(V + E)` per source on an acyclic graph. The topological
//! order comes from [`TopologicalSort`]; its cycle error is propagated
//! unchanged and its operation count is added to this algorithm's count.
//!
//! # Critical path
//!
//! [`DagShortestPath::find_critical_path`] tries every vertex as a source and
//! keeps the `(source, end)` pair with the greatest finite longest-path
//! distance. Sources are scanned in ascending order, end vertices in
//! ascending order, and a candidate replaces the incumbent only when strictly
//! longer, so the first maximum found wins. This costs `O(V * (V + E))`.
//!
//! [`DagShortestPath::find_critical_path_linear`] computes the same maximal
//! length in one pass by starting every vertex at distance zero (a virtual
//! super-source). On ties it may pick a different path.

#![allow(clippy::module_name_repetitions)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraphError;
use crate::graph::model::{Graph, Weight};
use crate::graph::topo::TopologicalSort;
use crate::metrics::{Instrumented, Metrics, MetricsSnapshot};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Per-vertex distances and predecessors from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// The vertex the distances are measured from.
    pub source: usize,
    /// Best distance per vertex; `None` when unreachable from `source`.
    pub distances: Vec<Option<Weight>>,
    /// Predecessor on the best path; `None` for the source and unreached
    /// vertices.
    pub predecessors: Vec<Option<usize>>,
    pub metrics: MetricsSnapshot,
}

impl PathResult {
    #[must_use]
    pub fn distance(&self, vertex: usize) -> Option<Weight> {
        self.distances.get(vertex).copied().flatten()
    }

    #[must_use]
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Vertices on the best path from the source to `vertex`, source first.
    ///
    /// Returns `None` when `vertex` is unreachable.
    #[must_use]
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;
        Some(follow_predecessors(&self.predecessors, vertex))
    }
}

/// The maximum-weight path of a DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Vertices in path order. Empty only for a graph with no vertices.
    pub path: Vec<usize>,
    /// Total weight of `path`.
    pub length: Weight,
    pub metrics: MetricsSnapshot,
}

impl CriticalPath {
    #[must_use]
    pub fn source(&self) -> Option<usize> {
        self.path.first().copied()
    }

    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.path.last().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Which critical-path computation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalPathStrategy {
    /// Longest paths from every source; canonical tie-break.
    #[default]
    AllSources,
    /// One relaxation pass from a virtual super-source.
    SinglePass,
}

impl fmt::Display for CriticalPathStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSources => write!(f, "all-sources"),
            Self::SinglePass => write!(f, "single-pass"),
        }
    }
}

impl FromStr for CriticalPathStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all-sources" | "all_sources" => Ok(Self::AllSources),
            "single-pass" | "single_pass" => Ok(Self::SinglePass),
            other => Err(format!(
                "unknown critical path strategy '{other}' (expected all-sources or single-pass)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Objective {
    Shortest,
    Longest,
}

impl Objective {
    const fn improves(self, candidate: Weight, current: Weight) -> bool {
        match self {
            Self::Shortest => candidate < current,
            Self::Longest => candidate > current,
        }
    }
}

// ---------------------------------------------------------------------------
// DagShortestPath
// ---------------------------------------------------------------------------

/// Distance and critical-path computations over a borrowed acyclic [`Graph`].
#[derive(Debug)]
pub struct DagShortestPath<'g> {
    graph: &'g Graph,
    metrics: Metrics,
}

impl Instrumented for DagShortestPath<'_> {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }
}

impl<'g> DagShortestPath<'g> {
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            metrics: Metrics::new(),
        }
    }

    /// Minimum-weight distances from `source` to every vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::SourceOutOfRange`] for an invalid source,
    /// [`GraphError::CycleDetected`] when the graph is not a DAG.
    pub fn shortest_paths_from_source(&mut self, source: usize) -> Result<PathResult, GraphError> {
        self.single_source(source, Objective::Shortest)
    }

    /// Maximum-weight distances from `source` to every vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::SourceOutOfRange`] for an invalid source,
    /// [`GraphError::CycleDetected`] when the graph is not a DAG.
    pub fn longest_paths_from_source(&mut self, source: usize) -> Result<PathResult, GraphError> {
        self.single_source(source, Objective::Longest)
    }

    /// Run the critical-path computation selected by `strategy`.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] when the graph is not a DAG.
    pub fn critical_path(&mut self, strategy: CriticalPathStrategy) -> Result<CriticalPath, GraphError> {
        match strategy {
            CriticalPathStrategy::AllSources => self.find_critical_path(),
            CriticalPathStrategy::SinglePass => self.find_critical_path_linear(),
        }
    }

    /// Maximum-weight path over all `(source, end)` pairs, trying every
    /// vertex as the source.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] when the graph is not a DAG.
    pub fn find_critical_path(&mut self) -> Result<CriticalPath, GraphError> {
        self.reset();
        let n = self.graph.vertex_count();
        if n == 0 {
            return Ok(self.empty_critical_path());
        }

        let order = self.topological_order()?;

        // (length, predecessors of the winning run, end vertex)
        let mut best: Option<(Weight, Vec<Option<usize>>, usize)> = None;

        for source in 0..n {
            let mut distances = vec![None; n];
            distances[source] = Some(0);
            let mut predecessors = vec![None; n];
            self.relax(&order, &mut distances, &mut predecessors, Objective::Longest);

            let mut improved_end = None;
            for (vertex, distance) in distances.iter().enumerate() {
                if let Some(d) = *distance {
                    let incumbent = improved_end
                        .map(|(len, _)| len)
                        .or_else(|| best.as_ref().map(|(len, _, _)| *len));
                    if incumbent.is_none_or(|len| d > len) {
                        improved_end = Some((d, vertex));
                    }
                }
                self.increment_operation_count(1);
            }

            if let Some((length, end)) = improved_end {
                best = Some((length, predecessors, end));
            }
        }

        let Some((length, predecessors, end)) = best else {
            return Ok(self.empty_critical_path());
        };
        let path = follow_predecessors(&predecessors, end);

        debug!(
            length,
            hops = path.len().saturating_sub(1),
            operations = self.operation_count(),
            "critical path found (all sources)"
        );

        Ok(CriticalPath {
            path,
            length,
            metrics: self.metrics.snapshot(),
        })
    }

    /// Maximum-weight path computed in a single relaxation pass.
    ///
    /// Every vertex starts at distance zero, so `distance[v]` becomes the
    /// heaviest path ending at `v` from any start. The ending vertex is the
    /// lowest id achieving the maximum.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] when the graph is not a DAG.
    pub fn find_critical_path_linear(&mut self) -> Result<CriticalPath, GraphError> {
        self.reset();
        let n = self.graph.vertex_count();
        if n == 0 {
            return Ok(self.empty_critical_path());
        }

        let order = self.topological_order()?;
        let mut distances = vec![Some(0); n];
        let mut predecessors = vec![None; n];
        self.relax(&order, &mut distances, &mut predecessors, Objective::Longest);

        let mut best: Option<(Weight, usize)> = None;
        for (vertex, distance) in distances.iter().enumerate() {
            if let Some(d) = *distance {
                if best.is_none_or(|(len, _)| d > len) {
                    best = Some((d, vertex));
                }
            }
            self.increment_operation_count(1);
        }

        let Some((length, end)) = best else {
            return Ok(self.empty_critical_path());
        };
        let path = follow_predecessors(&predecessors, end);

        debug!(
            length,
            hops = path.len().saturating_sub(1),
            operations = self.operation_count(),
            "critical path found (single pass)"
        );

        Ok(CriticalPath {
            path,
            length,
            metrics: self.metrics.snapshot(),
        })
    }

    fn single_source(&mut self, source: usize, objective: Objective) -> Result<PathResult, GraphError> {
        self.reset();
        let n = self.graph.vertex_count();
        if source >= n {
            return Err(GraphError::SourceOutOfRange {
                vertex: source,
                vertex_count: n,
            });
        }

        let order = self.topological_order()?;
        let mut distances = vec![None; n];
        distances[source] = Some(0);
        let mut predecessors = vec![None; n];
        self.relax(&order, &mut distances, &mut predecessors, objective);

        debug!(
            source,
            ?objective,
            reached = distances.iter().filter(|d| d.is_some()).count(),
            operations = self.operation_count(),
            "single-source distances computed"
        );

        Ok(PathResult {
            source,
            distances,
            predecessors,
            metrics: self.metrics.snapshot(),
        })
    }

    /// Run Kahn's algorithm and fold its operation count into ours.
    fn topological_order(&mut self) -> Result<Vec<usize>, GraphError> {
        let topo = TopologicalSort::new(self.graph).sort()?;
        self.increment_operation_count(topo.metrics.operations);
        Ok(topo.order)
    }

    fn relax(
        &mut self,
        order: &[usize],
        distances: &mut [Option<Weight>],
        predecessors: &mut [Option<usize>],
        objective: Objective,
    ) {
        let graph = self.graph;
        for &u in order {
            if let Some(du) = distances[u] {
                for &v in graph.adjacent(u) {
                    let candidate = du.saturating_add(graph.weight(u, v).unwrap_or_default());
                    let better = distances[v].is_none_or(|dv| objective.improves(candidate, dv));
                    if better {
                        distances[v] = Some(candidate);
                        predecessors[v] = Some(u);
                    }
                    self.increment_operation_count(1);
                }
            }
            self.increment_operation_count(1);
        }
    }

    fn empty_critical_path(&self) -> CriticalPath {
        CriticalPath {
            path: Vec::new(),
            length: 0,
            metrics: self.metrics.snapshot(),
        }
    }
}

/// Walk predecessor links back from `end` and return the path start-first.
fn follow_predecessors(predecessors: &[Option<usize>], end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(prev) = predecessors.get(cursor).copied().flatten() {
        path.push(prev);
        cursor = prev;
        if path.len() > predecessors.len() {
            break;
        }
    }
    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
