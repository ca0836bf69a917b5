//! Headless simulation run
//! Advances a seeded world for a fixed number of turns and writes every
//! turn report to a JSON file

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use global_dominion::ai::PolicyKind;
use global_dominion::core::config::SimulationConfig;
use global_dominion::core::error::{DominionError, Result};
use global_dominion::simulation::{Simulation, TurnReport};

/// Headless run - AI-only world for balance checks
#[derive(Parser, Debug)]
#[command(name = "headless_run")]
#[command(about = "Run the simulation without a player and dump turn reports")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to simulate
    #[arg(long, default_value_t = 40)]
    turns: u32,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// AI policy for every country: random, utility_based, scripted
    #[arg(long)]
    policy: Option<String>,

    /// Enable structural pressure drift
    #[arg(long, default_value_t = false)]
    pressure: bool,

    /// Where to write the turn reports
    #[arg(long, default_value = "simulation_output.json")]
    output: PathBuf,

    /// Print every turn summary
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(policy) = &args.policy {
        config.ai.default_policy = PolicyKind::parse(policy)
            .ok_or_else(|| DominionError::InvalidConfig(format!("unknown policy '{}'", policy)))?;
    }
    if args.pressure {
        config.drift.structural_pressure = true;
    }

    let mut sim = Simulation::seeded(config, args.seed)?;
    // Every country is AI controlled
    sim.registry_mut().clear_player();

    println!("Starting Global Dominion headless run");
    println!("=====================================");
    println!("Seed: {}", args.seed);
    println!("Policy: {}", sim.config().ai.default_policy.name());
    println!("Simulating {} turns...", args.turns);
    println!();

    let start = Instant::now();
    let mut reports: Vec<TurnReport> = Vec::with_capacity(args.turns as usize);
    for _ in 0..args.turns {
        let report = sim.advance_turn();
        if args.verbose {
            println!("{}", report.summary());
        }
        reports.push(report);
    }
    let elapsed = start.elapsed();

    let decisions: usize = reports.iter().map(|r| r.actions.len()).sum();
    let events = reports.iter().filter(|r| r.event.is_some()).count();
    println!(
        "Simulated to {} ({} turns): {} AI decisions, {} world events",
        sim.current_year(),
        sim.current_turn(),
        decisions,
        events
    );
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    let json = serde_json::to_string_pretty(&reports)?;
    std::fs::write(&args.output, &json)?;
    println!("\nFull output written to {}", args.output.display());

    println!("\n--- Final Standings ---");
    let mut standings: Vec<_> = sim.countries().iter().collect();
    standings.sort_by(|a, b| b.economy.gdp.total_cmp(&a.economy.gdp));
    for country in standings {
        println!(
            "{} {:<16} gdp {:>8.0}  stability {:>5.1}  escalation {:>5.1}",
            country.flag, country.name, country.economy.gdp, country.economy.stability, country.escalation_risk
        );
    }

    println!("\n--- Latest Headlines ---");
    for item in sim.latest_news(5) {
        println!("[T{}] {}: {}", item.turn, item.actors.join(", "), item.headline);
    }

    Ok(())
}
