#![forbid(unsafe_code)]
//! smartsched-core library.
//!
//! Graph engine for task/job dependency networks: strongly connected
//! components, condensation, topological order, single-source DAG distances
//! and the critical (maximum-weight) path.
//!
//! # Conventions
//!
//! - **Errors**: Use the [`error::GraphError`] / [`dataset::DatasetError`]
//!   enums; callers at the binary boundary wrap them in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Typical Usage
//!
//! ```rust
//! use smartsched_core::graph::{DagShortestPath, Graph, SccFinder, TopologicalSort};
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 2);
//! graph.add_edge(0, 2, 5);
//! graph.add_edge(1, 3, 1);
//! graph.add_edge(2, 3, 1);
//!
//! let mut finder = SccFinder::new(&graph);
//! let sccs = finder.find_sccs();
//! assert_eq!(sccs.components.len(), 4);
//!
//! let condensed = finder.build_condensation_graph(&sccs.components);
//! let order = TopologicalSort::new(&condensed).sort().expect("condensation is acyclic");
//! assert_eq!(order.order.len(), 4);
//!
//! let mut paths = DagShortestPath::new(&graph);
//! let critical = paths.find_critical_path().expect("graph is acyclic");
//! assert_eq!(critical.length, 6);
//! assert_eq!(critical.path, vec![0, 2, 3]);
//! ```

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod graph;
pub mod metrics;

pub use analysis::{AnalysisOptions, AnalysisReport, analyze};
pub use error::GraphError;
pub use graph::Graph;
