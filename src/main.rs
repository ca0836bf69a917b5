//! Global Dominion - Entry Point
//!
//! Interactive command line over the shared simulation. A background clock
//! can drive turns in real time while commands are typed; every completed
//! turn is printed by the report listener.

use global_dominion::ai::PolicyKind;
use global_dominion::core::calendar::SimulationSpeed;
use global_dominion::core::config::SimulationConfig;
use global_dominion::core::error::{DominionError, Result};
use global_dominion::core::types::{AllianceId, CountryId};
use global_dominion::simulation::{SharedSimulation, Simulation, SimulationClock};
use global_dominion::world::{Country, Expertise};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

/// Global Dominion - lead a nation through quarterly turns
#[derive(Parser, Debug)]
#[command(name = "dominion")]
#[command(about = "Turn-based geopolitical simulation")]
struct Args {
    /// Random seed for reproducible runs (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clock speed: slow, normal, fast, very_fast
    #[arg(long)]
    speed: Option<String>,

    /// Default AI policy: random, utility_based, scripted
    #[arg(long)]
    policy: Option<String>,

    /// Country the player controls
    #[arg(long)]
    player: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("global_dominion=info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    tracing::info!("Global Dominion starting...");

    let rt = Runtime::new()?;
    let _guard = rt.enter();

    let mut simulation = match args.seed {
        Some(seed) => Simulation::seeded(config.clone(), seed)?,
        None => Simulation::new(config.clone())?,
    };
    if let Some(player) = &args.player {
        simulation.set_player_country(&CountryId::new(player.as_str()))?;
    }

    let shared = SharedSimulation::new(simulation);
    let mut clock = SimulationClock::new(shared.clone(), config.clock.speed);
    spawn_report_listener(&rt, &shared);

    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "turn" | "t" => {
                rt.block_on(shared.advance_turn());
            }
            "run" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    for _ in 0..n {
                        rt.block_on(shared.advance_turn());
                    }
                }
                None => println!("Usage: run <number>"),
            },
            "status" | "s" => rt.block_on(shared.read(display_status)),
            "country" | "c" => match args.first() {
                Some(id) => {
                    let id = CountryId::new(*id);
                    let shown = rt.block_on(shared.read(|sim| sim.country(&id).map(display_country)));
                    if shown.is_none() {
                        println!("Unknown country: {}", id);
                    }
                }
                None => println!("Usage: country <id>"),
            },
            "decisions" | "d" => {
                let Some(player) = rt.block_on(shared.read(|sim| sim.player_country().map(|c| c.id.clone())))
                else {
                    println!("No player country selected");
                    continue;
                };
                for decision in rt.block_on(shared.available_decisions(&player)) {
                    println!("  {:<24} {} - {}", decision.id, decision.title, decision.description);
                }
            }
            "decide" => {
                let Some(decision_id) = args.first() else {
                    println!("Usage: decide <decision id>");
                    continue;
                };
                let Some(player) = rt.block_on(shared.read(|sim| sim.player_country().map(|c| c.id.clone())))
                else {
                    println!("No player country selected");
                    continue;
                };
                match rt.block_on(shared.decide(&player, decision_id)) {
                    Ok(outcome) => {
                        for effect in &outcome.applied.applied {
                            println!(
                                "  {} {:?}: {:.1} -> {:.1}",
                                effect.country, effect.stat, effect.before, effect.after
                            );
                        }
                        for consequence in &outcome.consequences {
                            println!("  ripple: {:?}", consequence);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "news" | "n" => {
                let n = args.first().and_then(|n| n.parse::<usize>().ok()).unwrap_or(10);
                rt.block_on(shared.read(|sim| {
                    for item in sim.latest_news(n) {
                        println!(
                            "  [T{} {}] {} {}: {}",
                            item.turn,
                            item.year,
                            item.category.icon(),
                            item.actors.join(", "),
                            item.headline
                        );
                    }
                }));
            }
            "play" => match args.first() {
                Some(id) => {
                    let id = CountryId::new(*id);
                    match rt.block_on(shared.write(|sim| sim.set_player_country(&id))) {
                        Ok(()) => println!("Now playing as {}", id),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("Usage: play <country id>"),
            },
            "clock" => handle_clock(&rt, &mut clock, &args),
            "advise" | "a" => {
                let Some(expertise) = args.first().and_then(|e| Expertise::parse(e)) else {
                    println!("Usage: advise <military|economy|foreign_policy|intelligence|domestic>");
                    continue;
                };
                let Some(player) = rt.block_on(shared.read(|sim| sim.player_country().map(|c| c.id.clone())))
                else {
                    println!("No player country selected");
                    continue;
                };
                match rt.block_on(shared.read(|sim| sim.briefing(&player, expertise))) {
                    Ok(brief) => {
                        println!("{} ({:?}): {}", brief.advisor, brief.expertise, brief.analysis);
                        for rec in &brief.recommendations {
                            println!("  - {}", rec);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "alliance" => match args.first() {
                Some(id) => {
                    let id = AllianceId::new(*id);
                    match rt.block_on(shared.read(|sim| sim.alliance_summary(&id))) {
                        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
                        None => println!("Unknown alliance: {}", id),
                    }
                }
                None => println!("Usage: alliance <id>"),
            },
            "sanction" => match (args.first(), args.get(1)) {
                (Some(alliance), Some(target)) => {
                    let alliance = AllianceId::new(*alliance);
                    let target = CountryId::new(*target);
                    match rt.block_on(shared.write(|sim| sim.impose_bloc_sanctions(&alliance, &target))) {
                        Ok(()) => println!("{} sanctions {}", alliance, target),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: sanction <alliance> <country>"),
            },
            "policy" => match (args.first(), args.get(1).and_then(|k| PolicyKind::parse(k))) {
                (Some(country), Some(kind)) => {
                    let country = CountryId::new(*country);
                    match rt.block_on(shared.write(|sim| sim.set_policy(&country, kind))) {
                        Ok(()) => println!("{} now uses the {} policy", country, kind.name()),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: policy <country> <random|utility_based|scripted>"),
            },
            "dump" => {
                let json = rt.block_on(shared.read(|sim| serde_json::to_string_pretty(sim.countries())))?;
                println!("{}", json);
            }
            _ => println!("Unknown command: {} (try 'help')", command),
        }
    }

    rt.block_on(clock.stop());
    tracing::info!("Global Dominion shutting down");
    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(speed) = &args.speed {
        config.clock.speed = SimulationSpeed::parse(speed)
            .ok_or_else(|| DominionError::InvalidConfig(format!("unknown speed '{}'", speed)))?;
    }
    if let Some(policy) = &args.policy {
        config.ai.default_policy = PolicyKind::parse(policy)
            .ok_or_else(|| DominionError::InvalidConfig(format!("unknown policy '{}'", policy)))?;
    }

    config.validate()?;
    Ok(config)
}

fn spawn_report_listener(rt: &Runtime, shared: &SharedSimulation) {
    let mut reports = shared.subscribe();
    rt.spawn(async move {
        loop {
            match reports.recv().await {
                Ok(report) => println!("{}", report.summary()),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Report listener fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn handle_clock(rt: &Runtime, clock: &mut SimulationClock, args: &[&str]) {
    match args.first().copied() {
        Some("start") => clock.start(),
        Some("pause") => clock.pause(),
        Some("resume") => clock.resume(),
        Some("stop") => rt.block_on(clock.stop()),
        Some("speed") => match args.get(1).and_then(|s| SimulationSpeed::parse(s)) {
            Some(speed) => clock.set_speed(speed),
            None => println!("Usage: clock speed <slow|normal|fast|very_fast>"),
        },
        _ => {
            println!("Clock: {:?} at {:?} ({:?} per turn)", clock.state(), clock.speed(), clock.speed().interval());
            return;
        }
    }
    println!("Clock: {:?}", clock.state());
}

fn print_help() {
    println!("\n=== GLOBAL DOMINION ===");
    println!();
    println!("Commands:");
    println!("  turn / t                 - Advance one turn");
    println!("  run <n>                  - Advance n turns");
    println!("  status / s               - World overview");
    println!("  country <id>             - Country details");
    println!("  decisions / d            - Decisions available to the player");
    println!("  decide <id>              - Execute a decision as the player");
    println!("  news [n]                 - Latest n headlines");
    println!("  play <id>                - Switch player country");
    println!("  advise <expertise>       - Advisor briefing for the player");
    println!("  alliance <id>            - Alliance summary");
    println!("  sanction <alliance> <id> - Coordinated bloc sanctions");
    println!("  policy <id> <kind>       - Set a country's AI policy");
    println!("  clock start|pause|resume|stop|speed <s>");
    println!("  dump                     - All countries as JSON");
    println!("  quit / q                 - Exit");
    println!();
}

fn display_status(sim: &Simulation) {
    let calendar = sim.calendar();
    println!(
        "\n--- Turn {} ({:?} {}) ---",
        calendar.current_turn(),
        calendar.current_quarter(),
        calendar.current_year()
    );
    for country in sim.countries() {
        let marker = if country.is_player_controlled { "*" } else { " " };
        println!(
            "{} {} {:<16} gdp {:>8.0}  stab {:>5.1}  appr {:>5.1}  esc {:>5.1}",
            marker,
            country.flag,
            country.name,
            country.economy.gdp,
            country.economy.stability,
            country.opinion.approval,
            country.escalation_risk
        );
    }
    println!();
}

fn display_country(country: &Country) {
    println!("\n{} {} ({})", country.flag, country.name, country.id);
    println!("  Government: {:?}", country.government.kind);
    if let Some(alliance) = &country.alliance {
        println!("  Alliance:   {}", alliance);
    }
    println!(
        "  Economy:    gdp {:.0}, debt {:.0} ({:.0}%), stability {:.1}",
        country.economy.gdp,
        country.economy.debt,
        country.debt_ratio() * 100.0,
        country.economy.stability
    );
    println!(
        "  Military:   strength {:.1}, readiness {:.1}, nuclear {}",
        country.military.strength, country.military.readiness, country.military.nuclear_capable
    );
    println!(
        "  Opinion:    approval {:.1}, unrest {:.1}",
        country.opinion.approval, country.opinion.unrest
    );
    println!(
        "  Other:      escalation {:.1}, technology {:.1}, resources {:.1}",
        country.escalation_risk, country.technology, country.resources
    );
    for (other, score) in &country.relations {
        println!("    {:<12} {:>6.1} {:?}", other, score, country.relation_stance(other));
    }
}
