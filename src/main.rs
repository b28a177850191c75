//! # u-jabeja CLI
//!
//! Loads a METIS graph, assigns initial colors and runs the Ja-be-Ja
//! simulation, writing one report line per round.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use u_jabeja::graph::{load_metis, InitialColorPolicy};
use u_jabeja::jabeja::{AnnealingPolicy, JabejaConfig, JabejaRunner, NodeSelectionPolicy};
use u_jabeja::report::FileReport;

/// Command-line interface for the Ja-be-Ja simulator
#[derive(Parser, Debug)]
#[command(name = "u-jabeja")]
#[command(about = "Ja-be-Ja graph partitioning with simulated annealing")]
#[command(version)]
struct Cli {
    /// Graph file in METIS adjacency format
    #[arg(long)]
    graph: PathBuf,

    /// Number of rounds
    #[arg(long, default_value_t = 1000)]
    rounds: usize,

    /// Number of partitions (colors)
    #[arg(long, default_value_t = 4)]
    num_partitions: u32,

    /// Initial temperature
    #[arg(long, default_value_t = 2.0)]
    temp: f64,

    /// Cooldown step (subtracted for LINEAR, multiplied for EXPONENTIAL)
    #[arg(long, default_value_t = 0.003)]
    delta: f64,

    /// Neighbors sampled as swap candidates
    #[arg(long, default_value_t = 3)]
    rand_neighbors_sample_size: usize,

    /// Nodes sampled from the whole graph as swap candidates
    #[arg(long, default_value_t = 6)]
    uniform_rand_sample_size: usize,

    /// Exponent applied to same-color degrees
    #[arg(long, default_value_t = 2.0)]
    alpha: f64,

    /// LOCAL, RANDOM or HYBRID
    #[arg(long, default_value_t = NodeSelectionPolicy::Hybrid)]
    node_selection_policy: NodeSelectionPolicy,

    /// ROUND_ROBIN, BATCH or RANDOM
    #[arg(long, default_value_t = InitialColorPolicy::RoundRobin)]
    graph_init_color_policy: InitialColorPolicy,

    /// LINEAR or EXPONENTIAL
    #[arg(long, default_value_t = AnnealingPolicy::Linear)]
    annealing_policy: AnnealingPolicy,

    /// Reset the temperature every this many rounds (0 = never)
    #[arg(long, default_value_t = 0)]
    restart: usize,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the report file
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> JabejaConfig {
        JabejaConfig::default()
            .with_rounds(self.rounds)
            .with_temperature(self.temp)
            .with_delta(self.delta)
            .with_annealing(self.annealing_policy)
            .with_node_selection(self.node_selection_policy)
            .with_neighbor_sample_size(self.rand_neighbors_sample_size)
            .with_random_sample_size(self.uniform_rand_sample_size)
            .with_alpha(self.alpha)
            .with_restart(self.restart)
            .with_seed(self.seed)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();

    let graph = load_metis(&cli.graph)
        .with_context(|| format!("failed to load graph {}", cli.graph.display()))?
        .build(cli.graph_init_color_policy, cli.num_partitions, cli.seed)
        .context("failed to color graph")?;
    info!(
        "loaded {}: {} nodes, {} edges",
        cli.graph.display(),
        graph.len(),
        graph.edge_count()
    );

    let mut report = FileReport::for_run(
        &cli.output_dir,
        &cli.graph,
        cli.graph_init_color_policy,
        &config,
    );
    let mut runner = JabejaRunner::new(graph, config)?;
    let result = runner
        .run(&mut report)
        .with_context(|| format!("failed to write report {}", report.path().display()))?;

    info!(
        "finished {} rounds: edge cut {}, swaps {}, migrations {}",
        result.rounds, result.edge_cut, result.swaps, result.migrations
    );
    println!("{}", report.path().display());
    Ok(())
}
