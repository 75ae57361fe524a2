//! `ssched dot`: Graphviz rendering of a dataset or its condensation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use petgraph::dot::Dot;
use serde::Serialize;
use smartsched_core::Graph;
use smartsched_core::dataset::GraphData;
use smartsched_core::graph::{CondensationWeight, SccFinder};

use crate::config::SschedConfig;
use crate::output::{OutputMode, render};

/// Arguments for `ssched dot`.
#[derive(Args, Debug)]
pub struct DotArgs {
    /// Dataset JSON file.
    pub file: PathBuf,

    /// Render the SCC condensation instead of the raw graph.
    #[arg(long)]
    pub condensed: bool,

    /// Weight policy for condensation edges (with --condensed).
    #[arg(long, value_name = "unit|min|max|sum")]
    pub condensation_weight: Option<CondensationWeight>,
}

#[derive(Debug, Serialize)]
struct DotOutput {
    condensed: bool,
    dot: String,
}

/// DOT text for `graph`; node labels are vertex ids, edge labels weights.
#[must_use]
pub fn to_dot(graph: &Graph) -> String {
    Dot::new(&graph.to_petgraph()).to_string()
}

/// Execute `ssched dot`.
pub fn run_dot(args: &DotArgs, config: &SschedConfig, output: OutputMode) -> Result<()> {
    let graph = GraphData::load(&args.file)
        .with_context(|| format!("failed to load dataset {}", args.file.display()))?
        .to_graph()
        .with_context(|| format!("dataset {} has invalid edges", args.file.display()))?;

    let dot = if args.condensed {
        let policy = args
            .condensation_weight
            .unwrap_or(config.analysis.condensation_weight);
        let mut finder = SccFinder::new(&graph);
        let scc = finder.find_sccs();
        to_dot(&finder.build_condensation_graph_with(&scc.components, policy))
    } else {
        to_dot(&graph)
    };

    let payload = DotOutput {
        condensed: args.condensed,
        dot,
    };
    render(output, &payload, |p, w| write!(w, "{}", p.dot))
}
