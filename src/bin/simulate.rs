use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use adaptive_rps::ai::opponents::OpponentKind;
use adaptive_rps::ai::AdaptiveAgent;
use adaptive_rps::config::AppConfig;
use adaptive_rps::persistence::LoadOutcome;
use adaptive_rps::session::{ShutdownFlag, SimulationConfig, Simulator};

/// Pit the adaptive agent against a scripted opponent.
#[derive(Parser)]
#[command(name = "simulate", about = "Run the adaptive RPS agent against a scripted player")]
struct Cli {
    /// Opponent: constant, constant:<move>, cycle, random or mirror
    #[arg(long, default_value = "random")]
    opponent: OpponentKind,

    /// Number of rounds to play
    #[arg(long, default_value_t = 1000)]
    rounds: usize,

    /// Print a progress line every N rounds
    #[arg(long, default_value_t = 100)]
    log_interval: usize,

    /// Path to TOML configuration file
    #[arg(long, default_value = "rps.toml")]
    config: PathBuf,

    /// Start from the learning file instead of empty tables
    #[arg(long)]
    resume: bool,

    /// Write the learning file when the run ends
    #[arg(long)]
    save: bool,

    /// Override the learning file path
    #[arg(long)]
    state: Option<PathBuf>,

    /// Seed both the agent and a random opponent
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(state) = cli.state {
        app_config.persistence.path = state;
    }
    if cli.seed.is_some() {
        app_config.agent.seed = cli.seed;
    }
    app_config.validate().context("validating configuration")?;

    let mut agent = AdaptiveAgent::new(app_config.agent.clone(), app_config.persistence.clone());
    if cli.resume {
        match agent.load().context("loading learning file")? {
            LoadOutcome::Loaded => println!(
                "Resumed from {} ({} games)",
                app_config.persistence.path.display(),
                agent.stats().games_played()
            ),
            LoadOutcome::Missing | LoadOutcome::ResetCorrupt => {
                println!("No usable learning file, starting fresh")
            }
        }
    }

    let shutdown = ShutdownFlag::install().context("installing signal handler")?;
    let mut opponent = cli.opponent.build(cli.seed.map(|s| s.wrapping_add(1)));
    let simulator = Simulator::new(SimulationConfig {
        rounds: cli.rounds,
        log_interval: cli.log_interval,
    });
    let summary = simulator.run_until(&mut agent, opponent.as_mut(), true, &shutdown);
    if summary.interrupted {
        tracing::info!(rounds = summary.rounds, "simulation interrupted");
    }

    if cli.save {
        agent.save().context("saving learning state")?;
        println!("Saved learning state to {}", app_config.persistence.path.display());
    }
    Ok(())
}
