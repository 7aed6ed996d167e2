//! danker CLI: PageRank over sorted link files
//!
//! Ranks go to stdout as `<id>\t<rank>` lines; progress and timing go to
//! stderr through `tracing`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use danker::{compute, RunConfig};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "danker", version, about = "danker PageRank.")]
struct Cli {
    /// Link file sorted by source (first column)
    left_sorted: Option<PathBuf>,

    /// Damping factor in (0, 1)
    #[arg(env = "DANKER_DAMPING")]
    damping: Option<f64>,

    /// Number of iterations
    #[arg(env = "DANKER_ITERATIONS")]
    iterations: Option<usize>,

    /// Start value for every node
    #[arg(env = "DANKER_START_VALUE")]
    start_value: Option<f64>,

    /// Same links sorted by target (second column); enables the low-memory mode
    #[arg(long, alias = "right_sorted")]
    right_sorted: Option<PathBuf>,

    /// YAML run configuration. Replaces the positional arguments; the
    /// DANKER_* environment variables and --right-sorted still override it
    #[arg(long, conflicts_with = "left_sorted")]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge the optional config file with command-line values.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match (&self.config, &self.left_sorted) {
            (Some(path), _) => RunConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            (None, Some(left_sorted)) => RunConfig::new(left_sorted),
            (None, None) => bail!("LEFT_SORTED is required unless --config is given"),
        };

        if let Some(right_sorted) = &self.right_sorted {
            config.right_sorted = Some(right_sorted.clone());
        }
        if let Some(damping) = self.damping {
            config.rank.damping = damping;
        }
        if let Some(iterations) = self.iterations {
            config.rank.iterations = iterations;
        }
        if let Some(start_value) = self.start_value {
            config.rank.start_value = start_value;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.run_config()?;
    info!("Mode: {:?}, {:?}", config.mode(), config.rank);
    let start = Instant::now();

    let ranks = compute(&config)
        .with_context(|| format!("PageRank on '{}' failed", config.left_sorted.display()))?;

    eprintln!(
        "Computation of PageRank on '{}' with danker took {:.2} seconds.",
        config.left_sorted.display(),
        start.elapsed().as_secs_f64()
    );

    ranks
        .write_tsv(io::stdout().lock())
        .context("Failed to write ranks")?;
    Ok(())
}
