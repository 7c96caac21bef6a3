//! Property tests: every stat mutation stays inside [0, 100]

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use frontline::campaign::supply::update_supply;
use frontline::campaign::{Brigade, Region, Scenario, Terrain, UnitType, Weather};
use frontline::core::{Control, Difficulty, EngineConfig, Faction};
use frontline::events::{apply_event_effect, EventCatalog, EventSide};
use frontline::turn::resolve_turn;

fn weather() -> impl Strategy<Value = Weather> {
    prop::sample::select(Weather::ALL.to_vec())
}

fn side() -> impl Strategy<Value = EventSide> {
    prop::sample::select(vec![EventSide::Friendly, EventSide::Enemy, EventSide::Neutral])
}

fn roster(stats: &[(i32, i32, i32)]) -> Vec<Brigade> {
    stats
        .iter()
        .enumerate()
        .map(|(i, (strength, morale, supply))| {
            let location = if i % 2 == 0 { "home" } else { "front" };
            Brigade::new(format!("b{i}"), format!("Brigade {i}"), UnitType::Mechanized, location)
                .with_stats(*strength, *morale, *supply, 50)
        })
        .collect()
}

fn map() -> Vec<Region> {
    vec![
        Region::new("home", "Home", Control::Ukraine, Terrain::Urban)
            .with_adjacency(&["front"])
            .with_enemy_strength(5),
        Region::new("front", "Front", Control::Contested, Terrain::Rural)
            .with_adjacency(&["home", "enemy"])
            .with_enemy_strength(60),
        Region::new("enemy", "Enemy", Control::Russia, Terrain::Forest)
            .with_adjacency(&["front"])
            .with_enemy_strength(95),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn event_effects_stay_in_range(
        stats in prop::collection::vec((0..=100i32, 0..=100i32, 0..=100i32), 1..6),
        value in -150..150i32,
        event_index in 0usize..64,
        side in side(),
        seed in any::<u64>(),
    ) {
        let catalog = EventCatalog::builtin().unwrap();
        let all: Vec<_> = catalog.ukraine.iter().chain(&catalog.russia).chain(&catalog.neutral).collect();
        let mut event = all[event_index % all.len()].clone();
        event.value = value;

        let mut brigades = roster(&stats);
        let mut regions = map();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        apply_event_effect(&event, side, &mut brigades, &mut regions, Faction::Ukraine, &mut rng);

        for b in &brigades {
            prop_assert!(b.stats_in_range(), "{} out of range after {}", b.id, event.id);
        }
        for r in &regions {
            prop_assert!((0..=100).contains(&r.enemy_strength_estimate));
            prop_assert!((0..=100).contains(&r.artillery_intensity));
        }
    }

    #[test]
    fn supply_stays_in_range(
        supply in 0..=100i32,
        weather in weather(),
        modifier in 0.0..3.0f64,
        russian in any::<bool>(),
    ) {
        let faction = if russian { Faction::Russia } else { Faction::Ukraine };
        let brigade = Brigade::new("b", "B", UnitType::Armor, "front").with_stats(80, 80, supply, 50);
        let updated = update_supply(&brigade, &map(), weather, faction, modifier);
        prop_assert!((0..=100).contains(&updated.supply));
        prop_assert_eq!(updated.strength, brigade.strength);
    }

    #[test]
    fn whole_turns_stay_in_range(seed in any::<u64>(), turns in 1usize..4) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = Scenario::defense().unwrap().new_game(Difficulty::hard(), &mut rng);
        let catalog = EventCatalog::builtin().unwrap();
        let config = EngineConfig::default();

        for _ in 0..turns {
            state = resolve_turn(&state, &config, &catalog, &mut rng).state;
            for b in &state.brigades {
                prop_assert!(b.stats_in_range());
                prop_assert!(b.drone_count <= config.drone_cap);
            }
            for r in &state.regions {
                prop_assert!((0..=100).contains(&r.enemy_strength_estimate));
            }
            prop_assert!(state.enemy_drones <= config.drone_cap);
        }
    }
}
