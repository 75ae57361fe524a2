//! Fixed-size, edge-weighted directed graph.
//!
//! Vertices are dense integers `0..vertex_count`. Each edge is stored once in
//! the forward adjacency of its source and once in the reverse adjacency of
//! its target, in insertion order. Parallel edges between the same ordered
//! pair each get their own adjacency slot, but the weight lookup only keeps
//! the most recently written weight for that pair.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::GraphError;

/// Edge weight type. Negative and zero weights are accepted.
pub type Weight = i64;

/// Directed graph with forward/reverse adjacency and a sparse weight map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
    weights: HashMap<(usize, usize), Weight>,
}

impl Graph {
    /// Create a graph with `vertex_count` vertices and no edges.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            reverse: vec![Vec::new(); vertex_count],
            weights: HashMap::new(),
        }
    }

    /// Build a graph from `(from, to, weight)` triples, rejecting any
    /// endpoint outside `0..vertex_count`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for the first invalid triple.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, Weight)>,
    {
        let mut graph = Self::new(vertex_count);
        for (from, to, weight) in edges {
            if from >= vertex_count || to >= vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    from,
                    to,
                    vertex_count,
                });
            }
            graph.add_edge(from, to, weight);
        }
        Ok(graph)
    }

    /// Append the edge `from -> to` and record its weight.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is outside `0..vertex_count`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Weight) {
        assert!(
            from < self.vertex_count() && to < self.vertex_count(),
            "edge {from} -> {to} out of range for {} vertices",
            self.vertex_count()
        );
        self.adjacency[from].push(to);
        self.reverse[to].push(from);
        self.weights.insert((from, to), weight);
    }

    /// Successors of `vertex` in edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    #[must_use]
    pub fn adjacent(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Predecessors of `vertex` in edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    #[must_use]
    pub fn reverse_adjacent(&self, vertex: usize) -> &[usize] {
        &self.reverse[vertex]
    }

    /// Last-written weight of `from -> to`, or `None` if there is no edge.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> Option<Weight> {
        self.weights.get(&(from, to)).copied()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of adjacency slots, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate `(from, to, weight)` in ascending `from`, then adjacency order.
    ///
    /// Parallel edges all report the pair's current (last-written) weight.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(from, succ)| {
            succ.iter().map(move |&to| {
                let weight = self.weight(from, to).unwrap_or_default();
                (from, to, weight)
            })
        })
    }

    /// Convert to a petgraph `DiGraph` whose node weights are the vertex ids.
    ///
    /// Node index `i` corresponds to vertex `i`.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<usize, Weight> {
        let mut graph = DiGraph::with_capacity(self.vertex_count(), self.edge_count());
        for vertex in 0..self.vertex_count() {
            graph.add_node(vertex);
        }
        for (from, to, weight) in self.edges() {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), weight);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_has_isolated_vertices() {
        let g = Graph::new(3);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 0);
        for v in 0..3 {
            assert!(g.adjacent(v).is_empty());
            assert!(g.reverse_adjacent(v).is_empty());
        }
    }

    #[test]
    fn add_edge_updates_both_directions() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1, 4);
        g.add_edge(0, 2, 7);
        g.add_edge(2, 1, 1);

        assert_eq!(g.adjacent(0), &[1, 2]);
        assert_eq!(g.reverse_adjacent(1), &[0, 2]);
        assert_eq!(g.weight(0, 2), Some(7));
        assert_eq!(g.weight(1, 0), None, "reverse pair has no edge");
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn parallel_edges_keep_slots_but_last_weight_wins() {
        let mut g = Graph::new(2);
        g.add_edge(0, 1, 5);
        g.add_edge(0, 1, 2);

        assert_eq!(g.adjacent(0), &[1, 1]);
        assert_eq!(g.reverse_adjacent(1), &[0, 0]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(0, 1), Some(2));
    }

    #[test]
    fn negative_and_zero_weights_are_kept() {
        let mut g = Graph::new(3);
        g.add_edge(0, 1, -3);
        g.add_edge(1, 2, 0);
        assert_eq!(g.weight(0, 1), Some(-3));
        assert_eq!(g.weight(1, 2), Some(0));
    }

    #[test]
    fn from_edges_rejects_out_of_range() {
        let err = Graph::from_edges(2, [(0, 1, 1), (1, 2, 1)]).expect_err("2 is out of range");
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                from: 1,
                to: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn add_edge_panics_on_contract_violation() {
        let mut g = Graph::new(1);
        g.add_edge(0, 3, 1);
    }

    #[test]
    fn edges_iterate_in_insertion_order() {
        let g = Graph::from_edges(3, [(1, 2, 9), (0, 2, 3), (0, 1, 1)]).expect("valid");
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 2, 3), (0, 1, 1), (1, 2, 9)]);
    }

    #[test]
    fn petgraph_conversion_preserves_shape() {
        let g = Graph::from_edges(4, [(0, 1, 2), (1, 2, 3), (3, 0, 4)]).expect("valid");
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 4);
        assert_eq!(pg.edge_count(), 3);
        let e = pg
            .find_edge(NodeIndex::new(3), NodeIndex::new(0))
            .expect("edge 3 -> 0");
        assert_eq!(pg[e], 4);
        assert_eq!(pg[NodeIndex::new(2)], 2);
    }
}
