//! `ssched generate`: write the seeded sample datasets.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use smartsched_core::generator;

use crate::output::{OutputMode, kv, render, section};

/// Arguments for `ssched generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory the `<name>.json` files are written to.
    #[arg(long, default_value = "data")]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    directory: PathBuf,
    seed: u64,
    datasets: Vec<&'static str>,
}

/// Execute `ssched generate`.
pub fn run_generate(args: &GenerateArgs, output: OutputMode) -> Result<()> {
    let datasets = generator::write_all(&args.out)
        .with_context(|| format!("failed to generate datasets into {}", args.out.display()))?;

    let payload = GenerateOutput {
        directory: args.out.clone(),
        seed: generator::SEED,
        datasets,
    };

    render(output, &payload, |p, w| {
        section(w, &format!("Generated {} datasets", p.datasets.len()))?;
        kv(w, "directory", p.directory.display().to_string())?;
        kv(w, "seed", p.seed.to_string())?;
        for name in &p.datasets {
            writeln!(w, "  {name}.json")?;
        }
        Ok(())
    })
}
