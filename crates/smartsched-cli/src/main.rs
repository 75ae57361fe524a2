#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ssched: dependency-graph analysis for task scheduling",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Path to an ssched.toml (defaults to ./ssched.toml if present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        OutputMode::from_json_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze a dataset",
        long_about = "Find SCCs, condense, order components, and compute distances and the critical path.",
        after_help = "EXAMPLES:\n    # Analyze with the dataset's own source\n    ssched analyze data/tasks.json\n\n    # Override the source and fold condensation weights by minimum\n    ssched analyze data/small_1.json --source 0 --condensation-weight min\n\n    # Emit machine-readable output\n    ssched analyze data/tasks.json --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Generate sample datasets",
        long_about = "Write the seeded small/medium/large datasets and tasks.json.",
        after_help = "EXAMPLES:\n    # Write into ./data\n    ssched generate\n\n    # Write elsewhere\n    ssched generate --out /tmp/graphs"
    )]
    Generate(cmd::generate::GenerateArgs),

    #[command(
        about = "Print a Graphviz DOT rendering",
        after_help = "EXAMPLES:\n    # Raw graph\n    ssched dot data/tasks.json | dot -Tsvg > tasks.svg\n\n    # SCC condensation\n    ssched dot data/tasks.json --condensed"
    )]
    Dot(cmd::dot::DotArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SSCHED_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "ssched=debug,smartsched_core=debug,info"
        } else if verbose {
            "ssched=info,smartsched_core=info,warn"
        } else {
            "warn"
        })
    });

    let format = env::var("SSCHED_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.output_mode();
    let cwd = env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &cwd)?;

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, &config, output),
        Commands::Generate(args) => cmd::generate::run_generate(args, output),
        Commands::Dot(args) => cmd::dot::run_dot(args, &config, output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if output::render_error(cli.output_mode(), &err).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
