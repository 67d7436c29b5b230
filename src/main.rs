use std::collections::HashSet;
use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use pullseq::dataset::{distinct_input, nested_input, Uniqueness};
use pullseq::{flatten, SequenceExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pullseq", about = "Compare pull-based sequence adapters against stdlib spellings")]
struct Cli {
    /// Timed repetitions per variant (the fastest is reported).
    #[arg(long, default_value_t = 5, global = true)]
    repeat: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time distinct_by against a HashSet-filter baseline.
    Distinct {
        /// Number of generated elements.
        #[arg(long, default_value_t = 100_000)]
        size: usize,
        /// Key duplication profile: same, distinct or mixed.
        #[arg(long, default_value = "mixed")]
        uniqueness: Uniqueness,
    },
    /// Time flatten against Iterator::flatten.
    Flatten {
        /// Number of generated sublists.
        #[arg(long, default_value_t = 10_000)]
        outer: usize,
        /// Elements per non-empty sublist.
        #[arg(long, default_value_t = 10)]
        inner: usize,
        /// Probability that a sublist is empty.
        #[arg(long, default_value_t = 0.25)]
        empty_probability: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    ensure!(cli.repeat > 0, "--repeat must be at least 1");

    match cli.command {
        Commands::Distinct { size, uniqueness } => run_distinct(size, uniqueness, cli.repeat),
        Commands::Flatten {
            outer,
            inner,
            empty_probability,
        } => run_flatten(outer, inner, empty_probability, cli.repeat),
    }
}

fn run_distinct(size: usize, uniqueness: Uniqueness, repeat: u32) -> Result<()> {
    info!(size, %uniqueness, repeat, "generating distinct input");
    let input = distinct_input(size, uniqueness);

    let baseline = fastest(repeat, || {
        let mut seen = HashSet::new();
        input.iter().copied().filter(|v| seen.insert(*v)).last()
    });
    let optimized = fastest(repeat, || input.iter().copied().distinct_by(|v| *v).last());

    report("distinct", &format!("{uniqueness}/{size}"), baseline, optimized);
    Ok(())
}

fn run_flatten(outer: usize, inner: usize, empty_probability: f64, repeat: u32) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&empty_probability),
        "--empty-probability must lie in [0, 1], got {empty_probability}"
    );
    info!(outer, inner, empty_probability, repeat, "generating nested input");
    let input = nested_input(outer, inner, empty_probability);

    let baseline = fastest(repeat, || input.iter().flatten().last());
    let optimized = fastest(repeat, || flatten(input.iter()).last());

    report(
        "flatten",
        &format!("p={empty_probability}/{outer}x{inner}"),
        baseline,
        optimized,
    );
    Ok(())
}

/// Run `body` `repeat` times and keep the fastest wall-clock time.
fn fastest<T>(repeat: u32, mut body: impl FnMut() -> T) -> Duration {
    let mut best = Duration::MAX;
    for round in 0..repeat {
        let start = Instant::now();
        black_box(body());
        let elapsed = start.elapsed();
        debug!(round, ?elapsed, "timed round");
        best = best.min(elapsed);
    }
    best
}

fn report(name: &str, params: &str, baseline: Duration, optimized: Duration) {
    let speedup = baseline.as_secs_f64() / optimized.as_secs_f64().max(f64::EPSILON);
    println!(
        "{name} {params}\tbaseline={baseline:?}\toptimized={optimized:?}\tspeedup={speedup:.2}x"
    );
}
