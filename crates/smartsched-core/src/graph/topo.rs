//! Topological ordering (Kahn's algorithm).
//!
//! In-degree-zero vertices are seeded into a FIFO queue in ascending id
//! order; afterwards vertices are enqueued in the order their in-degree
//! reaches zero. No further tie-breaking by id is applied.

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::model::Graph;
use crate::metrics::{Instrumented, Metrics, MetricsSnapshot};

/// A complete topological order and the diagnostics of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopoResult {
    /// Permutation of `0..V` consistent with every edge direction.
    pub order: Vec<usize>,
    pub metrics: MetricsSnapshot,
}

impl TopoResult {
    /// Position of every vertex in [`TopoResult::order`].
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        let mut pos = vec![0; self.order.len()];
        for (i, &v) in self.order.iter().enumerate() {
            pos[v] = i;
        }
        pos
    }
}

/// Kahn topological sort over a borrowed [`Graph`].
#[derive(Debug)]
pub struct TopologicalSort<'g> {
    graph: &'g Graph,
    metrics: Metrics,
}

impl Instrumented for TopologicalSort<'_> {
    fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }
}

impl<'g> TopologicalSort<'g> {
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            metrics: Metrics::new(),
        }
    }

    /// Compute a topological order of the whole graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] when the graph has a cycle. No
    /// partial order is returned in that case.
    pub fn sort(&mut self) -> Result<TopoResult, GraphError> {
        self.reset();
        let n = self.graph.vertex_count();

        let mut in_degree = vec![0_usize; n];
        for u in 0..n {
            for &v in self.graph.adjacent(u) {
                in_degree[v] += 1;
                self.increment_operation_count(1);
            }
            self.increment_operation_count(1);
        }

        let mut queue: VecDeque<usize> = VecDeque::new();
        for (v, &deg) in in_degree.iter().enumerate() {
            if deg == 0 {
                queue.push_back(v);
            }
        }
        self.increment_operation_count(n as u64);

        let mut order = Vec::with_capacity(n);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for &v in self.graph.adjacent(u) {
                in_degree[v] -= 1;
                if in_degree[v] == 0 {
                    queue.push_back(v);
                }
                self.increment_operation_count(1);
            }
            self.increment_operation_count(1);
        }

        if order.len() != n {
            debug!(emitted = order.len(), vertices = n, "topological sort found a cycle");
            return Err(GraphError::CycleDetected {
                emitted: order.len(),
                vertex_count: n,
            });
        }

        debug!(vertices = n, operations = self.operation_count(), "topological order computed");

        Ok(TopoResult {
            order,
            metrics: self.metrics.snapshot(),
        })
    }
}
