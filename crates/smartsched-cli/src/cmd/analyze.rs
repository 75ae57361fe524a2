//! `ssched analyze`: run the full pipeline over one dataset.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use smartsched_core::analysis::{ComponentOrder, CondensationSummary, Stage};
use smartsched_core::dataset::GraphData;
use smartsched_core::graph::{
    CondensationWeight, CriticalPath, CriticalPathStrategy, PathResult, SccResult,
};
use smartsched_core::{AnalysisOptions, AnalysisReport, analyze};
use tracing::{debug, instrument};

use crate::config::SschedConfig;
use crate::output::{OutputMode, arrow_path, comma_list, kv, render, section};

/// Arguments for `ssched analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Dataset JSON file.
    pub file: PathBuf,

    /// Source vertex for shortest/longest distances.
    #[arg(long)]
    pub source: Option<usize>,

    /// How crossing-edge weights fold into condensation edges.
    #[arg(long, value_name = "unit|min|max|sum")]
    pub condensation_weight: Option<CondensationWeight>,

    /// Critical path computation.
    #[arg(long, value_name = "all-sources|single-pass")]
    pub critical_path: Option<CriticalPathStrategy>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    file: &'a Path,
    options: AnalysisOptions,
    #[serde(flatten)]
    report: AnalysisReport,
}

/// Flags win over the dataset's own source, which wins over the config.
fn resolve_options(args: &AnalyzeArgs, data: &GraphData, config: &SschedConfig) -> AnalysisOptions {
    AnalysisOptions {
        source: args
            .source
            .or(data.source)
            .or(config.analysis.default_source),
        condensation_weight: args
            .condensation_weight
            .unwrap_or(config.analysis.condensation_weight),
        critical_path: args.critical_path.unwrap_or(config.analysis.critical_path),
    }
}

/// Execute `ssched analyze`.
#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn run_analyze(args: &AnalyzeArgs, config: &SschedConfig, output: OutputMode) -> Result<()> {
    let data = GraphData::load(&args.file)
        .with_context(|| format!("failed to load dataset {}", args.file.display()))?;
    let graph = data
        .to_graph()
        .with_context(|| format!("dataset {} has invalid edges", args.file.display()))?;

    let options = resolve_options(args, &data, config);
    debug!(?options, "analysis options resolved");

    let payload = AnalyzeOutput {
        file: &args.file,
        options,
        report: analyze(&graph, options),
    };
    render(output, &payload, render_human)
}

// ---------------------------------------------------------------------------
// Human rendering
// ---------------------------------------------------------------------------

fn render_human(payload: &AnalyzeOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    let report = &payload.report;
    section(w, &format!("Graph {}", payload.file.display()))?;
    kv(w, "vertices", report.vertex_count.to_string())?;
    kv(w, "edges", report.edge_count.to_string())?;
    kv(w, "acyclic", if report.is_acyclic() { "yes" } else { "no" })?;
    writeln!(w)?;

    render_scc(&report.scc, w)?;
    render_condensation(&report.condensation, w)?;
    render_component_order(&report.component_order, w)?;

    if let Some(stage) = &report.shortest_paths {
        render_distances("Shortest paths", stage, w)?;
    }
    if let Some(stage) = &report.longest_paths {
        render_distances("Longest paths", stage, w)?;
    }
    render_critical(&report.critical_path, payload.options.critical_path, w)
}

fn render_scc(scc: &SccResult, w: &mut dyn Write) -> io::Result<()> {
    section(w, &format!("Strongly connected components ({})", scc.component_count()))?;
    for (id, members) in scc.components.iter().enumerate() {
        let marker = if members.len() > 1 { "  (cycle)" } else { "" };
        writeln!(w, "  C{id:<4} [{}]{marker}", comma_list(members))?;
    }
    kv(w, "metrics", scc.metrics.to_string())?;
    writeln!(w)
}

fn render_condensation(condensation: &CondensationSummary, w: &mut dyn Write) -> io::Result<()> {
    section(
        w,
        &format!(
            "Condensation ({} vertices, {} edges, {} weights)",
            condensation.vertex_count, condensation.edge_count, condensation.weight_policy
        ),
    )?;
    for (from, to, weight) in &condensation.edges {
        writeln!(w, "  C{from} -> C{to}  w={weight}")?;
    }
    kv(w, "metrics", condensation.metrics.to_string())?;
    writeln!(w)
}

fn render_component_order(stage: &Stage<ComponentOrder>, w: &mut dyn Write) -> io::Result<()> {
    section(w, "Component order")?;
    match stage {
        Stage::Computed(order) => {
            let components: Vec<String> =
                order.component_order.iter().map(|c| format!("C{c}")).collect();
            kv(w, "components", components.join(" -> "))?;
            kv(w, "tasks", arrow_path(&order.task_order))?;
            kv(w, "metrics", order.metrics.to_string())?;
        }
        Stage::Skipped { reason } => kv(w, "skipped", reason)?,
    }
    writeln!(w)
}

fn render_distances(heading: &str, stage: &Stage<PathResult>, w: &mut dyn Write) -> io::Result<()> {
    match stage {
        Stage::Computed(result) => {
            section(w, &format!("{heading} from {}", result.source))?;
            writeln!(w, "  {:<8} {:>10}  path", "vertex", "distance")?;
            for vertex in 0..result.distances.len() {
                match (result.distance(vertex), result.path_to(vertex)) {
                    (Some(d), Some(path)) => {
                        writeln!(w, "  {vertex:<8} {d:>10}  {}", arrow_path(&path))?;
                    }
                    _ => writeln!(w, "  {vertex:<8} {:>10}  -", "INF")?,
                }
            }
            kv(w, "metrics", result.metrics.to_string())?;
        }
        Stage::Skipped { reason } => {
            section(w, heading)?;
            kv(w, "skipped", reason)?;
        }
    }
    writeln!(w)
}

fn render_critical(
    stage: &Stage<CriticalPath>,
    strategy: CriticalPathStrategy,
    w: &mut dyn Write,
) -> io::Result<()> {
    section(w, &format!("Critical path ({strategy})"))?;
    match stage {
        Stage::Computed(critical) => {
            kv(w, "path", arrow_path(&critical.path))?;
            kv(w, "length", critical.length.to_string())?;
            kv(w, "metrics", critical.metrics.to_string())?;
        }
        Stage::Skipped { reason } => kv(w, "skipped", reason)?,
    }
    Ok(())
}
