//! Dependency graph model and the algorithms that run over it.
//!
//! # Overview
//!
//! [`Graph`] is a fixed-size, edge-weighted directed graph. Each algorithm
//! borrows it read-only and carries its own [`Metrics`](crate::metrics::Metrics)
//! for operation counting.
//!
//! ## Pipeline
//!
//! ```text
//! (vertex count, edge triples)
//!        ↓  Graph::from_edges()
//! Graph (may contain cycles)
//!        ↓  SccFinder::find_sccs()
//! SccResult (partition in Kosaraju pop order)
//!        ↓  SccFinder::build_condensation_graph()
//! condensation Graph (DAG, one vertex per SCC)
//!        ↓  TopologicalSort::sort()
//! TopoResult (component order)
//!
//! Graph (acyclic only)
//!        ↓  DagShortestPath::{shortest,longest}_paths_from_source()
//! PathResult (distances + predecessors)
//!        ↓  DagShortestPath::find_critical_path()
//! CriticalPath (maximum-weight path)
//! ```

pub mod model;
pub mod paths;
pub mod scc;
pub mod topo;

// Re-export primary types at module level for convenience.
pub use model::{Graph, Weight};
pub use paths::{CriticalPath, CriticalPathStrategy, DagShortestPath, PathResult};
pub use scc::{CondensationWeight, SccFinder, SccResult, component_ids, expand_component_order};
pub use topo::{TopoResult, TopologicalSort};
