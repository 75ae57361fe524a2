//! End-to-end analysis of one dependency graph.
//!
//! Runs the full pipeline (SCC partition, condensation, component ordering,
//! distances, critical path) and collects everything into one serializable
//! [`AnalysisReport`].
//!
//! Distance computations need an acyclic graph. When the input has cycles
//! those stages are reported as [`Stage::Skipped`] with the reason instead of
//! failing the whole analysis; the SCC and condensation stages always run.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::graph::{
    CondensationWeight, CriticalPath, CriticalPathStrategy, DagShortestPath, Graph, PathResult,
    SccFinder, SccResult, TopologicalSort, Weight, expand_component_order,
};
use crate::metrics::{Instrumented, MetricsSnapshot};

/// Knobs for [`analyze`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Source vertex for single-source distances; distances are skipped
    /// when `None`.
    pub source: Option<usize>,
    pub condensation_weight: CondensationWeight,
    pub critical_path: CriticalPathStrategy,
}

/// Outcome of a pipeline stage that may be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Stage<T> {
    Computed(T),
    Skipped { reason: String },
}

impl<T> Stage<T> {
    /// The computed value, if the stage ran.
    #[must_use]
    pub const fn computed(&self) -> Option<&T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::Skipped { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    fn skipped<E: ToString>(reason: E) -> Self {
        Self::Skipped {
            reason: reason.to_string(),
        }
    }
}

/// Shape of the condensation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondensationSummary {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub weight_policy: CondensationWeight,
    /// `(from component, to component, weight)` in insertion order.
    pub edges: Vec<(usize, usize, Weight)>,
    pub metrics: MetricsSnapshot,
}

/// Order of the components and the task order derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentOrder {
    /// Topological order of condensation vertices.
    pub component_order: Vec<usize>,
    /// Original vertices, component by component in `component_order`.
    pub task_order: Vec<usize>,
    pub metrics: MetricsSnapshot,
}

/// Everything [`analyze`] learned about a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub scc: SccResult,
    pub condensation: CondensationSummary,
    pub component_order: Stage<ComponentOrder>,
    /// Present only when a source was requested.
    pub shortest_paths: Option<Stage<PathResult>>,
    /// Present only when a source was requested.
    pub longest_paths: Option<Stage<PathResult>>,
    pub critical_path: Stage<CriticalPath>,
}

impl AnalysisReport {
    /// `true` when the distance stages ran, i.e. the input graph is a DAG.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !self.critical_path.is_skipped()
    }
}

/// Run the full analysis pipeline over `graph`.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn analyze(graph: &Graph, options: AnalysisOptions) -> AnalysisReport {
    let mut finder = SccFinder::new(graph);
    let scc = finder.find_sccs();

    let condensed = finder.build_condensation_graph_with(&scc.components, options.condensation_weight);
    let condensation = CondensationSummary {
        vertex_count: condensed.vertex_count(),
        edge_count: condensed.edge_count(),
        weight_policy: options.condensation_weight,
        edges: condensed.edges().collect(),
        metrics: finder.metrics().snapshot(),
    };

    let component_order = match TopologicalSort::new(&condensed).sort() {
        Ok(topo) => Stage::Computed(ComponentOrder {
            task_order: expand_component_order(&scc.components, &topo.order),
            component_order: topo.order,
            metrics: topo.metrics,
        }),
        Err(err) => Stage::skipped(err),
    };

    let mut paths = DagShortestPath::new(graph);

    let (shortest_paths, longest_paths) = options.source.map_or((None, None), |source| {
        let shortest = paths
            .shortest_paths_from_source(source)
            .map_or_else(Stage::skipped, Stage::Computed);
        let longest = paths
            .longest_paths_from_source(source)
            .map_or_else(Stage::skipped, Stage::Computed);
        (Some(shortest), Some(longest))
    });

    let critical_path = match paths.critical_path(options.critical_path) {
        Ok(critical) => Stage::Computed(critical),
        Err(err) => {
            warn!(%err, "graph is not a DAG; distance stages skipped");
            Stage::skipped(err)
        }
    };

    info!(
        components = scc.component_count(),
        cyclic_components = scc.cyclic_components().count(),
        acyclic = !critical_path.is_skipped(),
        "analysis complete"
    );

    AnalysisReport {
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        scc,
        condensation,
        component_order,
        shortest_paths,
        longest_paths,
        critical_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks_graph() -> Graph {
        Graph::from_edges(
            8,
            [
                (0, 1, 3),
                (1, 2, 2),
                (2, 3, 4),
                (3, 1, 1),
                (4, 5, 2),
                (5, 6, 5),
                (6, 7, 1),
            ],
        )
        .expect("valid")
    }

    #[test]
    fn cyclic_graph_degrades_gracefully() {
        let g = tasks_graph();
        let report = analyze(
            &g,
            AnalysisOptions {
                source: Some(4),
                ..AnalysisOptions::default()
            },
        );

        assert_eq!(report.scc.component_count(), 6);
        assert_eq!(report.condensation.vertex_count, 6);
        assert!(!report.component_order.is_skipped(), "condensation is a DAG");
        assert!(!report.is_acyclic());
        assert!(report.critical_path.is_skipped());
        assert!(
            report
                .shortest_paths
                .as_ref()
                .is_some_and(Stage::is_skipped)
        );
    }

    #[test]
    fn task_order_respects_component_dependencies() {
        let g = tasks_graph();
        let report = analyze(&g, AnalysisOptions::default());
        let order = report
            .component_order
            .computed()
            .expect("component order")
            .task_order
            .clone();

        assert_eq!(order.len(), 8);
        let pos = |v: usize| order.iter().position(|&x| x == v).expect("present");
        assert!(pos(0) < pos(1));
        assert!(pos(4) < pos(5));
        assert!(pos(6) < pos(7));
    }

    #[test]
    fn dag_runs_every_stage() {
        let g = Graph::from_edges(4, [(0, 1, 2), (0, 2, 5), (1, 3, 1), (2, 3, 1)]).expect("valid");
        let report = analyze(
            &g,
            AnalysisOptions {
                source: Some(0),
                ..AnalysisOptions::default()
            },
        );

        assert!(report.is_acyclic());
        let shortest = report
            .shortest_paths
            .as_ref()
            .and_then(Stage::computed)
            .expect("shortest paths");
        assert_eq!(shortest.distance(3), Some(3));

        let critical = report.critical_path.computed().expect("critical path");
        assert_eq!(critical.length, 6);
        assert_eq!(critical.path, vec![0, 2, 3]);
    }

    #[test]
    fn no_source_means_no_distance_sections() {
        let g = Graph::from_edges(2, [(0, 1, 1)]).expect("valid");
        let report = analyze(&g, AnalysisOptions::default());
        assert!(report.shortest_paths.is_none());
        assert!(report.longest_paths.is_none());
    }

    #[test]
    fn report_serializes_with_stage_tags() {
        let g = tasks_graph();
        let report = analyze(&g, AnalysisOptions::default());
        let json = serde_json::to_value(&report).expect("serialize");

        assert_eq!(json["critical_path"]["status"], "skipped");
        assert_eq!(json["component_order"]["status"], "computed");
        assert_eq!(json["condensation"]["weight_policy"], "unit");
        assert!(json["shortest_paths"].is_null());
    }
}
