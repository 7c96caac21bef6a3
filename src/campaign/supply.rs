//! Supply system for the operational layer
//!
//! Brigades draw supply from the region they stand in. Holding the ground,
//! staying connected to friendly territory, low enemy pressure and good
//! weather push supply toward 100; the opposite bleeds it toward 0.

use crate::campaign::brigade::Brigade;
use crate::campaign::region::{find_region, neighbors_of, Region};
use crate::campaign::weather::Weather;
use crate::core::types::{clamp_stat, Faction};

/// Flat supply drain applied every turn before regeneration
pub const SUPPLY_UPKEEP: f64 = 8.0;

/// Supply regenerated per turn at an effective rate of 1.0
pub const SUPPLY_REGEN_SCALE: f64 = 20.0;

/// Control bonus when the brigade's region is not held by its own side
pub const FOREIGN_GROUND_BONUS: f64 = 0.3;

/// Rate multiplier for a region with no friendly neighbours
pub const ISOLATION_PENALTY: f64 = 0.5;

/// Rate multiplier when the enemy estimate exceeds `PRESSURE_THRESHOLD`
pub const PRESSURE_PENALTY: f64 = 0.8;
pub const PRESSURE_THRESHOLD: i32 = 60;

/// True when none of the region's neighbours are held by `faction`
pub fn is_isolated(region: &Region, regions: &[Region], faction: Faction) -> bool {
    !neighbors_of(region, regions).any(|n| n.is_held_by(faction))
}

/// Effective supply rate for a brigade standing in `region`
pub fn effective_supply_rate(
    region: &Region,
    regions: &[Region],
    weather: Weather,
    faction: Faction,
    supply_modifier: f64,
) -> f64 {
    let base_rate = region.base_supply as f64 / 100.0;
    let control_bonus = if region.is_held_by(faction) { 1.0 } else { FOREIGN_GROUND_BONUS };
    let isolation = if is_isolated(region, regions, faction) { ISOLATION_PENALTY } else { 1.0 };
    let pressure = if region.enemy_strength_estimate > PRESSURE_THRESHOLD {
        PRESSURE_PENALTY
    } else {
        1.0
    };

    base_rate * control_bonus * isolation * pressure * (1.0 - weather.supply_penalty()) * supply_modifier
}

/// Recompute a brigade's supply for the turn
///
/// A brigade whose location is not on the map is returned unchanged.
pub fn update_supply(
    brigade: &Brigade,
    regions: &[Region],
    weather: Weather,
    faction: Faction,
    supply_modifier: f64,
) -> Brigade {
    let Some(location) = find_region(regions, &brigade.location) else {
        tracing::warn!(brigade = %brigade.id, location = %brigade.location, "brigade location not on map, supply unchanged");
        return brigade.clone();
    };

    let rate = effective_supply_rate(location, regions, weather, faction, supply_modifier);
    let change = rate * SUPPLY_REGEN_SCALE - SUPPLY_UPKEEP;
    let supply = (brigade.supply as f64 + change).clamp(0.0, 100.0).round() as i32;

    Brigade {
        supply,
        ..brigade.clone()
    }
}

/// Step multiplier from supply level to combat power
///
/// Thresholds are strict: exactly 70 falls in the 0.9 tier.
pub fn supply_combat_multiplier(supply: i32) -> f64 {
    if supply > 70 {
        1.0
    } else if supply > 50 {
        0.9
    } else if supply > 30 {
        0.7
    } else if supply > 10 {
        0.5
    } else {
        0.3
    }
}

pub fn apply_supply_to_combat(power: f64, supply: i32) -> f64 {
    power * supply_combat_multiplier(supply)
}

/// Morale drifts with supply: starving units sour, well-fed ones recover
pub fn apply_supply_to_morale(morale: i32, supply: i32) -> i32 {
    let delta = if supply < 20 {
        -5
    } else if supply < 40 {
        -2
    } else if supply > 80 {
        1
    } else {
        0
    };
    clamp_stat(morale + delta)
}

pub fn consume_supplies_for_movement(brigade: &Brigade, cost: i32) -> Brigade {
    Brigade {
        supply: clamp_stat(brigade.supply - cost),
        ..brigade.clone()
    }
}

pub fn consume_supplies_for_combat(brigade: &Brigade, cost: i32) -> Brigade {
    Brigade {
        supply: clamp_stat(brigade.supply - cost),
        ..brigade.clone()
    }
}
