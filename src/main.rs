//! Frontline - command-line campaign runner
//!
//! Plays a campaign turn by turn and prints each turn's log. Without
//! `--autoplay` the player's brigades receive no orders.

use clap::Parser;
use std::path::PathBuf;

use frontline::autoplay::plan_orders;
use frontline::campaign::Scenario;
use frontline::core::config::{Difficulty, DifficultyLevel, EngineConfig};
use frontline::core::error::Result;
use frontline::core::types::Faction;
use frontline::events::EventCatalog;
use frontline::session::{Campaign, JsonFileStore, StateStore};

#[derive(Parser, Debug)]
#[command(name = "frontline")]
#[command(about = "Resolve an operational campaign turn by turn")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many turns even if the campaign is still running
    #[arg(long)]
    turns: Option<u32>,

    #[arg(long, value_enum, default_value_t = DifficultyLevel::Normal)]
    difficulty: DifficultyLevel,

    /// Side the player commands
    #[arg(long, value_enum, default_value_t = Faction::Ukraine)]
    faction: Faction,

    /// Engine constants (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resume from and save to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Let the built-in commander issue the player's orders
    #[arg(long, default_value_t = false)]
    autoplay: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frontline=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let store = args.save.as_ref().map(JsonFileStore::new);

    let resumed = match &store {
        Some(store) => store.load()?,
        None => None,
    };
    let mut campaign = match resumed {
        Some(state) => {
            tracing::info!(turn = state.turn, "resuming saved campaign");
            Campaign::from_state_with(state, config, EventCatalog::builtin()?, args.seed)?
        }
        None => {
            let scenario = Scenario::for_faction(args.faction)?;
            println!("=== {} ===", scenario.name);
            Campaign::new_game_with(
                &scenario,
                Difficulty::preset(args.difficulty),
                config,
                EventCatalog::builtin()?,
                args.seed,
            )?
        }
    };

    for line in &campaign.state().event_log {
        println!("{}", line);
    }

    let mut played = 0;
    while !campaign.is_over() && args.turns.map_or(true, |limit| played < limit) {
        if args.autoplay {
            for order in plan_orders(campaign.state(), campaign.config()) {
                if let Err(e) = campaign.issue_order(order) {
                    tracing::warn!(error = %e, "autoplay order rejected");
                }
            }
        }

        let outcome = campaign.end_turn()?;
        println!();
        for line in &outcome.log {
            println!("{}", line);
        }
        played += 1;

        if let Some(store) = &store {
            campaign.save(store)?;
        }
    }

    let state = campaign.state();
    println!();
    println!(
        "Turn {} | strength {} | regions held {} | {}",
        state.turn,
        state.total_strength(),
        state.player_held_count(),
        match (state.game_over, state.victory) {
            (true, true) => "VICTORY",
            (true, false) => "DEFEAT",
            _ => "in progress",
        }
    );

    Ok(())
}
