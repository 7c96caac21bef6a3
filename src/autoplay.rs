//! Simple commander that plays the player's side
//!
//! Each operational brigade with enough supply attacks the weakest
//! adjacent region the player does not hold, provided the power ratio looks
//! favourable. Everyone else digs in.

use crate::campaign::brigade::{Brigade, Stance};
use crate::campaign::order::Order;
use crate::campaign::region::Region;
use crate::campaign::state::GameState;
use crate::combat::attack::{attacking_power, region_defense_power};
use crate::core::config::EngineConfig;

/// Attack only when our power is at least this multiple of theirs
pub const FAVOURABLE_RATIO: f64 = 1.5;

/// Weakest enemy-held neighbour of `brigade` and the power ratio against it
fn weakest_target<'a>(state: &'a GameState, brigade: &Brigade) -> Option<(&'a Region, f64)> {
    let here = state.region(&brigade.location)?;
    let power = attacking_power(brigade, state.weather);

    here.adjacency
        .iter()
        .filter_map(|id| state.region(id))
        .filter(|r| !r.is_held_by(state.player_faction))
        .map(|r| (r, power / region_defense_power(r).max(1.0)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Orders for every brigade, in roster order
pub fn plan_orders(state: &GameState, config: &EngineConfig) -> Vec<Order> {
    let mut orders = Vec::new();

    for brigade in state.brigades.iter().filter(|b| b.is_operational()) {
        let target = if brigade.supply > config.combat_supply_cost {
            weakest_target(state, brigade).filter(|(_, ratio)| *ratio >= FAVOURABLE_RATIO)
        } else {
            None
        };

        match target {
            Some((region, ratio)) => {
                tracing::debug!(brigade = %brigade.id, region = %region.id, ratio, "autoplay attack");
                orders.push(Order::Attack {
                    brigade: brigade.id.clone(),
                    target: region.id.clone(),
                });
            }
            None if brigade.stance != Stance::Hold => {
                orders.push(Order::StanceChange {
                    brigade: brigade.id.clone(),
                    stance: Stance::Hold,
                });
            }
            None => {}
        }
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::brigade::UnitType;
    use crate::campaign::region::Terrain;
    use crate::campaign::state::VictoryConditions;
    use crate::campaign::weather::Weather;
    use crate::core::config::Difficulty;
    use crate::core::types::{Control, Faction, RegionId};

    fn state(enemy_strength: i32, supply: i32) -> GameState {
        GameState {
            turn: 1,
            brigades: vec![
                Brigade::new("b1", "1st", UnitType::Armor, "home")
                    .with_stats(90, 90, supply, 70)
                    .with_stance(Stance::MobileDefense),
            ],
            regions: vec![
                Region::new("home", "Home", Control::Ukraine, Terrain::Rural).with_adjacency(&["strong", "weak"]),
                Region::new("strong", "Strong", Control::Russia, Terrain::Urban)
                    .with_adjacency(&["home"])
                    .with_enemy_strength(100),
                Region::new("weak", "Weak", Control::Russia, Terrain::Rural)
                    .with_adjacency(&["home"])
                    .with_enemy_strength(enemy_strength),
            ],
            weather: Weather::Clear,
            player_faction: Faction::Ukraine,
            difficulty: Difficulty::normal(),
            victory_conditions: VictoryConditions::default(),
            event_log: Vec::new(),
            orders: Vec::new(),
            enemy_drones: 0,
            game_over: false,
            victory: false,
        }
    }

    #[test]
    fn test_attacks_weakest_neighbor() {
        let orders = plan_orders(&state(10, 90), &EngineConfig::default());
        assert_eq!(orders, vec![Order::attack("b1", "weak")]);
        assert_eq!(orders[0].target(), Some(&RegionId::new("weak")));
    }

    #[test]
    fn test_digs_in_when_odds_are_poor() {
        let orders = plan_orders(&state(100, 90), &EngineConfig::default());
        assert_eq!(orders, vec![Order::stance("b1", Stance::Hold)]);
    }

    #[test]
    fn test_low_supply_holds() {
        let orders = plan_orders(&state(10, 5), &EngineConfig::default());
        assert_eq!(orders, vec![Order::stance("b1", Stance::Hold)]);
    }
}
