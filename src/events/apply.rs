//! Firing events and applying their effects

use crate::campaign::brigade::Brigade;
use crate::campaign::region::Region;
use crate::core::rng::RandomSource;
use crate::core::types::{clamp_stat, Faction};
use crate::events::catalog::{EffectType, EventCatalog, EventDef, EventSide, Scope, Trigger};

/// Regions with artillery intensity above this can be hit by counter-battery fire
pub const ARTILLERY_TARGET_THRESHOLD: i32 = 30;
/// Regions with an enemy estimate above this are candidates for weakening
pub const WEAKENING_TARGET_THRESHOLD: i32 = 30;

/// What a trigger produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventReport {
    /// Ids of fired events, in firing order
    pub fired: Vec<String>,
    pub messages: Vec<String>,
}

/// Roll every event of `trigger` and apply the ones that fire
///
/// Pools resolve friendly first, then enemy, then neutral; each event rolls
/// independently. Effects go straight into the working copies passed in.
pub fn trigger_random_events<R: RandomSource + ?Sized>(
    trigger: Trigger,
    brigades: &mut [Brigade],
    regions: &mut [Region],
    player: Faction,
    catalog: &EventCatalog,
    rng: &mut R,
) -> EventReport {
    let mut report = EventReport::default();

    for (side, pool) in catalog.pools_for(player) {
        for event in pool.iter().filter(|e| e.trigger == trigger) {
            if !rng.chance(event.probability) {
                continue;
            }
            report.fired.push(event.id.clone());
            report
                .messages
                .push(format!("{} {}: {}", side.prefix(), event.name, event.description));
            apply_event_effect(event, side, brigades, regions, player, rng);
        }
    }

    if !report.fired.is_empty() {
        tracing::debug!(?trigger, fired = ?report.fired, "events fired");
    }
    report
}

fn pick_brigade<'a, R: RandomSource + ?Sized>(brigades: &'a mut [Brigade], rng: &mut R) -> Option<&'a mut Brigade> {
    let index = rng.pick_index(brigades.len())?;
    brigades.get_mut(index)
}

/// Uniformly pick one region index among those matching `filter`
fn pick_region_index<R, F>(regions: &[Region], rng: &mut R, filter: F) -> Option<usize>
where
    R: RandomSource + ?Sized,
    F: Fn(&Region) -> bool,
{
    let candidates: Vec<usize> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| filter(*r))
        .map(|(i, _)| i)
        .collect();
    rng.pick_index(candidates.len()).map(|i| candidates[i])
}

/// Adjust one stat on one random brigade or on all of them
fn shift_brigade_stat<R, F>(scope: Scope, brigades: &mut [Brigade], rng: &mut R, shift: F)
where
    R: RandomSource + ?Sized,
    F: Fn(&mut Brigade),
{
    match scope {
        Scope::AllBrigades => brigades.iter_mut().for_each(&shift),
        Scope::SingleBrigade => {
            if let Some(brigade) = pick_brigade(brigades, rng) {
                shift(brigade);
            }
        }
        Scope::Region => {}
    }
}

/// Apply a fired event
///
/// Effects that help the player only land for friendly or neutral events;
/// effects that hurt the player only land for enemy or neutral events.
pub fn apply_event_effect<R: RandomSource + ?Sized>(
    event: &EventDef,
    side: EventSide,
    brigades: &mut [Brigade],
    regions: &mut [Region],
    player: Faction,
    rng: &mut R,
) {
    let helps_player = side != EventSide::Enemy;
    let hurts_player = side != EventSide::Friendly;
    let value = event.value;
    let ai = player.opponent();

    match event.effect {
        EffectType::MoraleChange if helps_player => {
            shift_brigade_stat(event.scope, brigades, rng, |b| b.morale = clamp_stat(b.morale + value));
        }
        EffectType::SupplyChange if helps_player => {
            shift_brigade_stat(event.scope, brigades, rng, |b| b.supply = clamp_stat(b.supply + value));
        }
        EffectType::StrengthBoost if helps_player => {
            shift_brigade_stat(event.scope, brigades, rng, |b| b.strength = clamp_stat(b.strength + value));
        }
        EffectType::FullRecovery if helps_player => {
            if let Some(b) = pick_brigade(brigades, rng) {
                b.strength = clamp_stat(b.strength + value);
                b.morale = clamp_stat(b.morale + value);
                b.supply = clamp_stat(b.supply + value);
            }
        }
        EffectType::AntiArmorBoost if helps_player => {
            if let Some(b) = pick_brigade(brigades, rng) {
                b.anti_armor_rating = clamp_stat(b.anti_armor_rating + value);
            }
        }
        EffectType::CombatBuff if helps_player => {
            if let Some(b) = pick_brigade(brigades, rng) {
                b.strength = clamp_stat(b.strength + value.abs());
            }
        }
        EffectType::EnemyWeakening if helps_player => {
            if let Some(i) = pick_region_index(regions, rng, |r| {
                r.is_held_by(ai) || r.enemy_strength_estimate > WEAKENING_TARGET_THRESHOLD
            }) {
                regions[i].shift_enemy_strength(value);
            }
        }
        EffectType::EnemySupplyDisrupt if helps_player => {
            for region in regions.iter_mut().filter(|r| r.is_held_by(ai)) {
                region.shift_enemy_strength(value);
            }
        }
        EffectType::ArtillerySuccess if helps_player => {
            if let Some(i) = pick_region_index(regions, rng, |r| r.artillery_intensity > ARTILLERY_TARGET_THRESHOLD) {
                regions[i].artillery_intensity = clamp_stat(regions[i].artillery_intensity + value);
            }
        }
        EffectType::IntelBonus if helps_player => {
            tracing::debug!(event = %event.id, "intel gathered, no state change");
        }
        EffectType::CombatDebuff if hurts_player => {
            if let Some(i) = pick_region_index(regions, rng, |r| r.is_held_by(player)) {
                let target = regions[i].id.clone();
                for b in brigades.iter_mut().filter(|b| b.location == target) {
                    b.strength = clamp_stat(b.strength + value);
                    b.supply = clamp_stat(b.supply + value.div_euclid(2));
                }
            }
        }
        EffectType::EwIntensify if hurts_player => {
            if let Some(i) = rng.pick_index(regions.len()) {
                regions[i].electronic_warfare_active = true;
            }
        }
        EffectType::WeatherIntensify => {
            tracing::debug!(event = %event.id, "weather event logged only");
        }
        _ => {
            tracing::debug!(event = %event.id, ?side, "effect does not apply for this side");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::brigade::UnitType;
    use crate::campaign::region::Terrain;
    use crate::core::rng::ScriptedRandom;
    use crate::core::types::Control;

    fn event(effect: EffectType, scope: Scope, value: i32) -> EventDef {
        EventDef {
            id: "test".into(),
            name: "Test Event".into(),
            description: "Something happens.".into(),
            trigger: Trigger::TurnStart,
            probability: 1.0,
            scope,
            effect,
            value,
        }
    }

    fn brigades() -> Vec<Brigade> {
        vec![
            Brigade::new("a", "A", UnitType::Armor, "home").with_stats(50, 95, 50, 10),
            Brigade::new("b", "B", UnitType::Mechanized, "front").with_stats(50, 50, 4, 10),
        ]
    }

    fn regions() -> Vec<Region> {
        let mut front = Region::new("front", "Front", Control::Ukraine, Terrain::Rural).with_enemy_strength(50);
        front.artillery_intensity = 40;
        vec![
            Region::new("home", "Home", Control::Ukraine, Terrain::Urban).with_enemy_strength(10),
            front,
            Region::new("enemy", "Enemy", Control::Russia, Terrain::Forest).with_enemy_strength(80),
        ]
    }

    #[test]
    fn test_all_brigades_morale_clamps() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::MoraleChange, Scope::AllBrigades, 10);
        apply_event_effect(&e, EventSide::Friendly, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(b[0].morale, 100);
        assert_eq!(b[1].morale, 60);
    }

    #[test]
    fn test_enemy_boost_is_ignored() {
        let mut b = brigades();
        let mut r = regions();
        let before = b.clone();
        let e = event(EffectType::StrengthBoost, Scope::AllBrigades, 15);
        apply_event_effect(&e, EventSide::Enemy, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(b, before);
    }

    #[test]
    fn test_neutral_supply_loss_floors_at_zero() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::SupplyChange, Scope::SingleBrigade, -10);
        apply_event_effect(&e, EventSide::Neutral, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.9));
        assert_eq!(b[1].supply, 0);
        assert_eq!(b[0].supply, 50);
    }

    #[test]
    fn test_combat_debuff_hits_player_region() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::CombatDebuff, Scope::Region, -15);
        // Player regions are home and front; 0.9 picks front
        apply_event_effect(&e, EventSide::Enemy, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.9));
        assert_eq!(b[1].strength, 35);
        assert_eq!(b[1].supply, 0);
        assert_eq!(b[0].strength, 50);
    }

    #[test]
    fn test_friendly_debuff_is_ignored() {
        let mut b = brigades();
        let mut r = regions();
        let before = b.clone();
        let e = event(EffectType::CombatDebuff, Scope::Region, -15);
        apply_event_effect(&e, EventSide::Friendly, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(b, before);
    }

    #[test]
    fn test_enemy_supply_disrupt_hits_only_ai_regions() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::EnemySupplyDisrupt, Scope::Region, -100);
        apply_event_effect(&e, EventSide::Friendly, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(r[2].enemy_strength_estimate, 0);
        assert_eq!(r[1].enemy_strength_estimate, 50);
    }

    #[test]
    fn test_enemy_weakening_targets_ai_or_heavy_regions() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::EnemyWeakening, Scope::Region, -10);
        // Candidates: front (estimate 50) and enemy; 0.0 picks front
        apply_event_effect(&e, EventSide::Friendly, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(r[1].enemy_strength_estimate, 40);
        assert_eq!(r[0].enemy_strength_estimate, 10);
    }

    #[test]
    fn test_artillery_success_with_no_candidates_skips() {
        let mut b = brigades();
        let mut r = regions();
        r[1].artillery_intensity = 10;
        let before = r.clone();
        let e = event(EffectType::ArtillerySuccess, Scope::Region, -20);
        apply_event_effect(&e, EventSide::Friendly, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.0));
        assert_eq!(r, before);
    }

    #[test]
    fn test_ew_marks_region() {
        let mut b = brigades();
        let mut r = regions();
        let e = event(EffectType::EwIntensify, Scope::Region, 0);
        apply_event_effect(&e, EventSide::Neutral, &mut b, &mut r, Faction::Ukraine, &mut ScriptedRandom::constant(0.5));
        assert!(r[1].electronic_warfare_active);
    }

    #[test]
    fn test_trigger_filters_and_prefixes() {
        let mut start = event(EffectType::MoraleChange, Scope::AllBrigades, 5);
        start.id = "start".into();
        let mut end = start.clone();
        end.id = "end".into();
        end.trigger = Trigger::TurnEnd;
        let mut hostile = event(EffectType::EwIntensify, Scope::Region, 0);
        hostile.id = "hostile".into();
        hostile.name = "Jamming".into();

        let catalog = EventCatalog {
            ukraine: vec![start, end],
            russia: vec![hostile],
            neutral: Vec::new(),
        };

        let mut b = brigades();
        let mut r = regions();
        let report = trigger_random_events(
            Trigger::TurnStart,
            &mut b,
            &mut r,
            Faction::Ukraine,
            &catalog,
            &mut ScriptedRandom::constant(0.0),
        );

        assert_eq!(report.fired, vec!["start".to_string(), "hostile".to_string()]);
        assert_eq!(report.messages[0], "[EVENT] Test Event: Something happens.");
        assert_eq!(report.messages[1], "[ENEMY] Jamming: Something happens.");
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let mut e = event(EffectType::MoraleChange, Scope::AllBrigades, 5);
        e.probability = 0.0;
        let catalog = EventCatalog {
            ukraine: vec![],
            russia: vec![],
            neutral: vec![e],
        };
        let report = trigger_random_events(
            Trigger::TurnStart,
            &mut brigades(),
            &mut regions(),
            Faction::Ukraine,
            &catalog,
            &mut ScriptedRandom::constant(0.0),
        );
        assert!(report.fired.is_empty());
    }
}
