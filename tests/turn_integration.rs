//! Turn pipeline integration tests
//!
//! Whole campaigns on the built-in scenarios with seeded generators.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use frontline::autoplay::plan_orders;
use frontline::campaign::{GameState, Order, Scenario, Stance};
use frontline::core::{Difficulty, EngineConfig, Faction, FrontlineError};
use frontline::events::EventCatalog;
use frontline::session::Campaign;
use frontline::turn::resolve_turn;

fn opening(scenario: Scenario, seed: u64) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    scenario.new_game(Difficulty::normal(), &mut rng)
}

#[test]
fn test_seeded_turns_are_reproducible() {
    let state = opening(Scenario::defense().unwrap(), 11);
    let catalog = EventCatalog::builtin().unwrap();
    let config = EngineConfig::default();

    let a = resolve_turn(&state, &config, &catalog, &mut ChaCha8Rng::seed_from_u64(99));
    let b = resolve_turn(&state, &config, &catalog, &mut ChaCha8Rng::seed_from_u64(99));
    assert_eq!(a.state, b.state);
    assert_eq!(a.log, b.log);
}

#[test]
fn test_seeded_campaigns_are_reproducible() {
    let run = |seed| {
        let mut campaign = Campaign::new_game(&Scenario::defense().unwrap(), Difficulty::hard(), seed).unwrap();
        for _ in 0..5 {
            if campaign.is_over() {
                break;
            }
            for order in plan_orders(campaign.state(), campaign.config()) {
                let _ = campaign.issue_order(order);
            }
            campaign.end_turn().unwrap();
        }
        campaign.state().clone()
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn test_turn_increments_and_orders_clear() {
    let mut state = opening(Scenario::defense().unwrap(), 3);
    let first = state.brigades[0].id.clone();
    state.orders.push(Order::StanceChange {
        brigade: first.clone(),
        stance: Stance::Fallback,
    });

    let out = resolve_turn(
        &state,
        &EngineConfig::default(),
        &EventCatalog::builtin().unwrap(),
        &mut ChaCha8Rng::seed_from_u64(3),
    );

    assert_eq!(out.state.turn, state.turn + 1);
    assert!(out.state.orders.is_empty());
    assert_eq!(out.log[0], format!("=== Turn {} Resolution ===", state.turn));
    assert!(out.log.iter().any(|l| l.starts_with("[PLAYER]")));
    assert_eq!(out.state.event_log.len(), state.event_log.len() + out.log.len());
    assert!(out.state.brigades.iter().all(|b| b.stats_in_range()));
    assert!(out.state.regions.iter().all(|r| (0..=100).contains(&r.enemy_strength_estimate)));
}

#[test]
fn test_destroyed_roster_is_defeat() {
    let mut state = opening(Scenario::defense().unwrap(), 8);
    for brigade in &mut state.brigades {
        brigade.strength = 0;
    }
    let out = resolve_turn(
        &state,
        &EngineConfig::default(),
        &EventCatalog::builtin().unwrap(),
        &mut ChaCha8Rng::seed_from_u64(8),
    );
    assert!(out.state.game_over);
    assert!(!out.state.victory);

    let mut campaign = Campaign::from_state(out.state, 8).unwrap();
    assert!(matches!(campaign.end_turn(), Err(FrontlineError::GameOver)));
}

#[test]
fn test_campaign_ends_by_turn_limit() {
    for faction in [Faction::Ukraine, Faction::Russia] {
        let scenario = Scenario::for_faction(faction).unwrap();
        let limit = scenario.victory.turn_limit;
        let mut campaign = Campaign::new_game(&scenario, Difficulty::easy(), 21).unwrap();

        while !campaign.is_over() {
            assert!(campaign.state().turn <= limit);
            for order in plan_orders(campaign.state(), campaign.config()) {
                let _ = campaign.issue_order(order);
            }
            campaign.end_turn().unwrap();
        }

        let last = campaign.state().event_log.last().unwrap();
        assert!(last.starts_with("*** VICTORY") || last.starts_with("*** DEFEAT"));
        assert_eq!(campaign.state().player_faction, faction);
    }
}

#[test]
fn test_state_survives_json() {
    let mut campaign = Campaign::new_game(&Scenario::offensive().unwrap(), Difficulty::normal(), 2).unwrap();
    campaign.end_turn().unwrap();
    let json = serde_json::to_string(campaign.state()).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, campaign.state());
}
