//! Sun Tzu Campaign - Command-line driver
//!
//! Runs a campaign from a scenario file (or the default scenario), prints the
//! narrative log or the snapshot history as JSON, and optionally saves or
//! resumes a campaign.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use suntzu_campaign::campaign::{
    history_to_json, load_state, save_state, Campaign, LogKind, SavedCampaign, ScenarioParams,
    TurnSnapshot, UnitKind,
};
use suntzu_campaign::core::{Outcome, Result};

/// Turn-based military campaign simulator
#[derive(Parser, Debug)]
#[command(name = "suntzu-campaign")]
#[command(about = "Simulate a Sun Tzu style military campaign turn by turn")]
struct Args {
    /// Number of turns to play (overrides the scenario)
    #[arg(long)]
    turns: Option<i64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario file (TOML)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Recruitment distribution, e.g. "40/20/10/10/10/5/5"
    #[arg(long)]
    recruit: Option<String>,

    /// Print the snapshot history as JSON instead of the narrative
    #[arg(long)]
    json: bool,

    /// Write the final campaign state to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume a campaign saved with --save
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("suntzu_campaign=info")),
        )
        .init();

    let args = Args::parse();
    let mut campaign = build_campaign(&args)?;

    if !args.json {
        println!(
            "=== Starting Military Campaign Simulation (Enemy AI: {}, seed {}) ===",
            campaign.state().enemy_ai.personality().name(),
            campaign.seed()
        );
    }

    let json = args.json;
    let outcome = campaign.run_until(|snapshot| {
        if !json {
            print_turn(snapshot);
        }
        false
    })?;

    if json {
        println!("{}", history_to_json(campaign.history()));
    } else {
        print_summary(&campaign, outcome);
    }

    if let Some(path) = &args.save {
        fs::write(path, save_state(campaign.state()).to_json()?)?;
        tracing::info!("Campaign saved to {}", path.display());
    }

    Ok(())
}

fn build_campaign(args: &Args) -> Result<Campaign> {
    if let Some(path) = &args.load {
        let record = SavedCampaign::from_json(&fs::read_to_string(path)?)?;
        let mut state = load_state(record)?;
        if let Some(turns) = args.turns {
            state.extend_budget(turns)?;
        }
        if let Some(recruit) = &args.recruit {
            state.recruit_distribution = recruit.parse()?;
        }
        tracing::info!("Resuming campaign from {} at turn {}", path.display(), state.turn);
        return Ok(Campaign::from_state(state, args.seed.unwrap_or_else(rand::random)));
    }

    let mut params = match &args.scenario {
        Some(path) => ScenarioParams::load(path)?,
        None => ScenarioParams::default(),
    };
    if let Some(turns) = args.turns {
        params.turn_budget = turns;
    }
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    if args.recruit.is_some() {
        params.recruit_distribution = args.recruit.clone();
    }

    Campaign::new(&params)
}

fn print_turn(snapshot: &TurnSnapshot) {
    println!("\n--- Turn {} ---", snapshot.turn);
    for entry in &snapshot.log {
        let tag = match entry.kind {
            LogKind::Info => "     ",
            LogKind::Victory => "[+]  ",
            LogKind::Defeat => "[-]  ",
            LogKind::Recruitment => "[r]  ",
            LogKind::Sabotage => "[!]  ",
            LogKind::Spy => "[s]  ",
            LogKind::Event => "[*]  ",
        };
        println!("{}{}", tag, entry.message);
    }
    println!("End of turn {}:", snapshot.turn);
    println!("  Your unit counts: {}", format_units(&snapshot.player_units));
    println!("  Enemy unit counts: {}", format_units(&snapshot.enemy_units));
    println!(
        "  Morale: You={:.2}, Enemy={:.2}",
        snapshot.morale.get(),
        snapshot.enemy_morale.get()
    );
    println!(
        "  Fatigue: {:.2}, Supply level: {:.2}",
        snapshot.fatigue.get(),
        snapshot.supply.get()
    );
    println!(
        "  Resources: Gold={}, Recruit Points={}, Fortifications={}",
        snapshot.resources.gold, snapshot.resources.recruit_points, snapshot.resources.fortification
    );
    println!(
        "  Terrain: {}, Weather: {}, Time: {}",
        snapshot.environment.terrain.name(),
        snapshot.environment.weather.name(),
        snapshot.environment.time_of_day.name()
    );
}

fn format_units(units: &BTreeMap<UnitKind, u32>) -> String {
    units
        .iter()
        .map(|(kind, count)| format!("{}={}", kind.display_name(), count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_summary(campaign: &Campaign, outcome: Option<Outcome>) {
    let state = campaign.state();
    println!("\n=== Simulation Ended ===");
    println!(
        "Final forces - You: {}, Enemy: {}",
        state.player_total(),
        state.enemy_total()
    );
    match outcome {
        Some(Outcome::Victory) => println!("Enemy army defeated! Campaign won!"),
        Some(Outcome::Defeat) => println!("Your army has been destroyed! Campaign lost."),
        _ if state.player_total() > state.enemy_total() => {
            println!("Campaign successful! Congratulations!")
        }
        _ => println!("Campaign lost or suspended."),
    }
}
