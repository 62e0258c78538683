//! `vinum`: cluster wine-chemistry samples with k-medians for a range of `k`.
//!
//! Reads a CSV of numeric rows, range-scales every column, runs k-medians for
//! each `k` in the sweep and prints how many samples ended up in each cluster.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vinum::{load_csv, report, run_sweep, standardize, Convergence, EmptyClusterPolicy, SweepConfig};

#[derive(Parser)]
#[command(name = "vinum")]
#[command(version)]
#[command(about = "K-medians clustering of wine-chemistry measurements")]
struct Cli {
    /// CSV file with one sample per line
    #[arg(default_value = "data.csv")]
    input: PathBuf,

    /// Treat the first line as a header
    #[arg(long)]
    headers: bool,

    /// Smallest k to evaluate
    #[arg(long, default_value_t = 2)]
    min_k: usize,

    /// Largest k to evaluate (inclusive)
    #[arg(long, default_value_t = 6)]
    max_k: usize,

    /// Update rounds before a run is reported as non-converging
    #[arg(long, default_value_t = 300)]
    max_iter: usize,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Accept medians that move at most this much instead of requiring an exact fixed point
    #[arg(long)]
    tolerance: Option<f64>,

    /// Keep the previous median of a cluster that runs empty instead of failing
    #[arg(long)]
    retain_empty: bool,

    /// Also run the k-means baseline for every k
    #[arg(long)]
    compare: bool,

    /// Restarts of the k-means baseline
    #[arg(long, default_value_t = 10)]
    n_init: usize,

    /// List the samples in each cluster
    #[arg(long)]
    members: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();

    let raw = load_csv(&cli.input, cli.headers)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    info!(rows = raw.nrows(), features = raw.ncols(), "samples loaded");

    let x = standardize(&raw).context("failed to standardize features")?;

    let config = SweepConfig {
        min_k: cli.min_k,
        max_k: cli.max_k,
        max_iter: cli.max_iter,
        seed: cli.seed,
        convergence: cli
            .tolerance
            .map_or(Convergence::Exact, Convergence::Tolerance),
        empty_cluster: if cli.retain_empty {
            EmptyClusterPolicy::RetainPrevious
        } else {
            EmptyClusterPolicy::Fail
        },
        compare: cli.compare,
        n_init: cli.n_init,
    };

    let entries = run_sweep(&x, &config).context("invalid sweep configuration")?;
    let elapsed = start.elapsed().as_secs_f64();

    match cli.format {
        Format::Text => {
            print!("{}", report::render_sweep(&entries, cli.members));
            println!("\nTime taken: {:.3}s", elapsed);
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&report::sweep_to_json(&entries))?);
            info!(elapsed_secs = elapsed, "sweep finished");
        }
    }

    if entries.iter().all(|entry| entry.result.is_err()) {
        bail!("no k in {}..={} produced a clustering", cli.min_k, cli.max_k);
    }

    Ok(())
}
