//! Balance simulator
//!
//! Levels random players, fights every pairing and reports win rates per
//! ability, weapon, armor, accessory and build.

use std::path::PathBuf;

use brute_arena::balance::run_balance_simulation;
use brute_arena::core::config::BalanceConfig;
use brute_arena::core::error::Result;
use clap::Parser;

/// Balance Simulator - round-robin win rates for random builds
#[derive(Parser, Debug)]
#[command(name = "balance_sim")]
#[command(about = "Run the offline balance simulation and print a report")]
struct Args {
    /// TOML config file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of player pools to generate
    #[arg(long)]
    cycles: Option<u32>,

    /// Combats per pairing
    #[arg(long)]
    matches: Option<u32>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the JSON report here
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brute_arena=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BalanceConfig::load(path)?,
        None => BalanceConfig::default(),
    };
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    if let Some(matches) = args.matches {
        config.matches_per_pair = matches;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    tracing::info!(
        cycles = config.cycles,
        players = config.players_per_cycle,
        target_level = config.target_level,
        fights = config.total_fights(),
        "Starting balance simulation"
    );

    let report = run_balance_simulation(&config);
    println!("{}", report.summary());

    if let Some(path) = &args.output {
        std::fs::write(path, report.to_json())?;
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(())
}
