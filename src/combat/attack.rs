//! Player brigade attacking a region
//!
//! Resolution is a hybrid: a dice phase sets the base casualties, then the
//! net dice result together with the power ratio picks one of five outcome
//! tiers. The first tier that matches wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::campaign::brigade::Brigade;
use crate::campaign::region::Region;
use crate::campaign::supply::apply_supply_to_combat;
use crate::campaign::weather::Weather;
use crate::combat::dice::{compare_dice, dice_count_for_power, CombatRolls, DiceOutcome};
use crate::combat::power::brigade_power;
use crate::combat::report;
use crate::core::config::EngineConfig;
use crate::core::rng::RandomSource;
use crate::core::types::{clamp_stat, Control, Faction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    DecisiveVictory,
    Victory,
    Stalemate,
    Setback,
    Defeat,
}

impl AttackOutcome {
    /// Pick the outcome tier from the net dice result and the power ratio
    pub fn classify(net_dice: i32, ratio: f64) -> Self {
        if net_dice >= 2 && ratio > 1.3 {
            Self::DecisiveVictory
        } else if (net_dice >= 1 && ratio > 1.0) || ratio > 1.6 {
            Self::Victory
        } else if net_dice == 0 || (ratio > 0.8 && ratio < 1.2) {
            Self::Stalemate
        } else if net_dice == -1 || ratio < 0.9 {
            Self::Setback
        } else {
            Self::Defeat
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DecisiveVictory => "DECISIVE VICTORY",
            Self::Victory => "VICTORY",
            Self::Stalemate => "STALEMATE",
            Self::Setback => "SETBACK",
            Self::Defeat => "DEFEAT",
        }
    }

    /// Extra (attacker, defender) losses on top of the dice casualties
    pub fn bonus_losses(self) -> (i32, i32) {
        match self {
            Self::DecisiveVictory => (0, 20),
            Self::Victory => (0, 10),
            Self::Stalemate => (5, 5),
            Self::Setback => (10, 0),
            Self::Defeat => (15, 0),
        }
    }

    pub fn morale_change(self) -> i32 {
        match self {
            Self::DecisiveVictory => 10,
            Self::Victory => 5,
            Self::Stalemate => -2,
            Self::Setback => -5,
            Self::Defeat => -10,
        }
    }

    pub fn captures(self) -> bool {
        matches!(self, Self::DecisiveVictory | Self::Victory)
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything an attack produced
#[derive(Debug, Clone)]
pub struct CombatResult {
    pub brigade: Brigade,
    pub region: Region,
    pub outcome: AttackOutcome,
    pub attacker_power: f64,
    pub defender_power: f64,
    pub dice: DiceOutcome,
    pub attacker_losses: i32,
    pub defender_losses: i32,
    pub morale_change: i32,
    pub messages: Vec<String>,
}

/// Attacking power: base power, then supply tier, weather, stance
pub fn attacking_power(brigade: &Brigade, weather: Weather) -> f64 {
    let power = apply_supply_to_combat(brigade_power(brigade), brigade.supply);
    power * weather.combat_multiplier() * brigade.stance.attack_multiplier()
}

/// Power of the enemy holding a region
pub fn region_defense_power(region: &Region) -> f64 {
    region.enemy_strength_estimate as f64 * region.terrain.defense_bonus()
}

pub fn resolve_combat<R: RandomSource + ?Sized>(
    attacker: &Brigade,
    region: &Region,
    weather: Weather,
    player: Faction,
    rng: &mut R,
    config: &EngineConfig,
) -> CombatResult {
    let attacker_dice = dice_count_for_power(attacking_power(attacker, weather), true);
    let defender_dice = dice_count_for_power(region_defense_power(region), false);
    let rolls = CombatRolls::draw_attack(rng, attacker_dice, defender_dice, config.attack_loss_jitter);
    resolve_combat_with_rolls(attacker, region, weather, player, &rolls, config)
}

/// Resolve an attack with fixed dice and jitter
pub fn resolve_combat_with_rolls(
    attacker: &Brigade,
    region: &Region,
    weather: Weather,
    player: Faction,
    rolls: &CombatRolls,
    config: &EngineConfig,
) -> CombatResult {
    let attacker_power = attacking_power(attacker, weather);
    let defender_power = region_defense_power(region);

    let mut messages = vec![
        report::combat_start(&attacker.name, &region.name),
        report::attacker_brigade(attacker),
        report::defender_info(region),
        format!("=== COMBAT: {} attacks {} ===", attacker.name, region.name),
        format!(
            "Attacker Power: {} (Strength {}, Supply {}%)",
            attacker_power.round(),
            attacker.strength,
            attacker.supply
        ),
        format!(
            "Defender Power: {} (Enemy Strength {}, Terrain: {})",
            defender_power.round(),
            region.enemy_strength_estimate,
            region.terrain
        ),
        report::dice_roll_line("Attacker", &rolls.attacker_dice),
        report::dice_roll_line("Defender", &rolls.defender_dice),
    ];

    let dice = compare_dice(&rolls.attacker_dice, &rolls.defender_dice);
    messages.extend(report::comparison_lines(&dice));

    let ratio = attacker_power / defender_power.max(1.0);
    messages.push(format!("Combat Ratio: {:.2}:1", ratio));

    let outcome = AttackOutcome::classify(dice.attacker_advantage(), ratio);
    let (attacker_bonus, defender_bonus) = outcome.bonus_losses();
    let attacker_losses = dice.defender_wins as i32 * config.attack_loss_per_die + rolls.attacker_jitter + attacker_bonus;
    let defender_losses = dice.attacker_wins as i32 * config.attack_loss_per_die + rolls.defender_jitter + defender_bonus;
    let morale_change = outcome.morale_change();

    messages.push(match outcome {
        AttackOutcome::DecisiveVictory => format!("DECISIVE VICTORY! {} overwhelms the defenders!", attacker.name),
        AttackOutcome::Victory => format!("VICTORY! {} captures {} after heavy fighting.", attacker.name, region.name),
        AttackOutcome::Stalemate => format!("STALEMATE: Fierce fighting with no clear victor at {}.", region.name),
        AttackOutcome::Setback => format!("SETBACK: {} forced to withdraw from {}.", attacker.name, region.name),
        AttackOutcome::Defeat => format!("DEFEAT: {} suffers heavy casualties and retreats!", attacker.name),
    });
    messages.push(format!("Casualties: Your forces -{}, Enemy -{}", attacker_losses, defender_losses));
    messages.push(format!("Morale change: {}", report::signed(morale_change)));
    messages.push(report::combat_results(
        &attacker.name,
        attacker_losses,
        morale_change,
        &region.name,
        defender_losses,
    ));
    if outcome.captures() {
        messages.push(format!("{} is now under your control!", region.name));
    }
    messages.push(report::combat_end(outcome.label()));

    let brigade = Brigade {
        strength: clamp_stat(attacker.strength - attacker_losses),
        morale: clamp_stat(attacker.morale + morale_change),
        experience: clamp_stat(attacker.experience + 2),
        ..attacker.clone()
    };
    let updated_region = Region {
        enemy_strength_estimate: (region.enemy_strength_estimate - defender_losses).max(0),
        control: if outcome.captures() {
            Control::from(player)
        } else {
            region.control
        },
        ..region.clone()
    };

    tracing::debug!(
        brigade = %attacker.id,
        region = %region.id,
        outcome = %outcome,
        ratio,
        attacker_losses,
        defender_losses,
        "attack resolved"
    );

    CombatResult {
        brigade,
        region: updated_region,
        outcome,
        attacker_power,
        defender_power,
        dice,
        attacker_losses,
        defender_losses,
        morale_change,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::brigade::{Stance, UnitType};
    use crate::campaign::region::Terrain;
    use crate::combat::report::{parse_marker, COMBAT_END, COMBAT_RESULTS};
    use crate::core::rng::ScriptedRandom;

    fn veteran() -> Brigade {
        Brigade::new("brigade_1", "93rd Mechanized Brigade", UnitType::Mechanized, "kyiv")
            .with_stats(85, 90, 80, 70)
            .with_stance(Stance::Hold)
    }

    fn rolls(attacker: &[u8], defender: &[u8], attacker_jitter: i32, defender_jitter: i32) -> CombatRolls {
        CombatRolls {
            attacker_dice: attacker.to_vec(),
            defender_dice: defender.to_vec(),
            attacker_jitter,
            defender_jitter,
        }
    }

    #[test]
    fn test_classify_tiers() {
        assert_eq!(AttackOutcome::classify(2, 1.31), AttackOutcome::DecisiveVictory);
        assert_eq!(AttackOutcome::classify(2, 1.3), AttackOutcome::Victory);
        assert_eq!(AttackOutcome::classify(-2, 1.7), AttackOutcome::Victory);
        assert_eq!(AttackOutcome::classify(0, 0.2), AttackOutcome::Stalemate);
        assert_eq!(AttackOutcome::classify(-2, 1.1), AttackOutcome::Stalemate);
        assert_eq!(AttackOutcome::classify(-1, 1.5), AttackOutcome::Setback);
        assert_eq!(AttackOutcome::classify(-2, 0.5), AttackOutcome::Setback);
        assert_eq!(AttackOutcome::classify(-2, 1.25), AttackOutcome::Defeat);
    }

    #[test]
    fn test_attacking_power_chain() {
        let power = attacking_power(&veteran(), Weather::Clear);
        assert!((power - 91.5705).abs() < 1e-6);
        let muddy = attacking_power(&veteran(), Weather::Mud);
        assert!((muddy - 91.5705 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_decisive_victory_captures() {
        let region = Region::new("kyiv_northwest", "Kyiv Northwest", Control::Contested, Terrain::Forest)
            .with_enemy_strength(45);
        let result = resolve_combat_with_rolls(
            &veteran(),
            &region,
            Weather::Clear,
            Faction::Ukraine,
            &rolls(&[5, 4, 3], &[3, 2], 0, 0),
            &EngineConfig::default(),
        );

        assert_eq!(result.outcome, AttackOutcome::DecisiveVictory);
        assert_eq!(result.defender_losses, 40);
        assert_eq!(result.attacker_losses, 0);
        assert_eq!(result.region.control, Control::Ukraine);
        assert_eq!(result.region.enemy_strength_estimate, 5);
        assert_eq!(result.brigade.strength, 85);
        assert_eq!(result.brigade.morale, 100);
        assert_eq!(result.brigade.experience, 72);
    }

    #[test]
    fn test_rural_assault_worked_example() {
        let region = Region::new("kyiv_northwest", "Kyiv Northwest", Control::Russia, Terrain::Rural)
            .with_enemy_strength(40);
        let result = resolve_combat_with_rolls(
            &veteran(),
            &region,
            Weather::Clear,
            Faction::Ukraine,
            &rolls(&[5, 4, 3], &[3, 2], 0, 0),
            &EngineConfig::default(),
        );

        let expected_power = 85.0 * 0.95 * 1.35 * 1.2 * 0.7;
        assert!((result.attacker_power - expected_power).abs() < 1e-9);
        assert_eq!(result.defender_power, 40.0);
        assert_eq!(result.dice.attacker_wins, 2);
        assert_eq!(result.dice.defender_wins, 0);
        assert_eq!(result.outcome, AttackOutcome::DecisiveVictory);
        assert_eq!(result.defender_losses, 2 * 10 + 20);
        assert_eq!(result.attacker_losses, 0);
        assert_eq!(result.morale_change, 10);
        assert_eq!(result.region.control, Control::Ukraine);
        assert_eq!(result.region.enemy_strength_estimate, 0);
        assert_eq!(result.brigade.strength, 85);
        assert_eq!(result.brigade.morale, 100);
        assert_eq!(result.brigade.experience, 72);
        assert!(result.messages.iter().any(|m| m == "Combat Ratio: 2.29:1"));
        assert_eq!(
            parse_marker(result.messages.last().unwrap(), COMBAT_END).unwrap(),
            vec![AttackOutcome::DecisiveVictory.label()]
        );
    }

    #[test]
    fn test_capture_goes_to_player_faction() {
        let region = Region::new("kyiv", "Kyiv", Control::Ukraine, Terrain::Rural).with_enemy_strength(10);
        let result = resolve_combat_with_rolls(
            &veteran(),
            &region,
            Weather::Clear,
            Faction::Russia,
            &rolls(&[6, 6], &[1], 0, 0),
            &EngineConfig::default(),
        );
        assert!(result.outcome.captures());
        assert_eq!(result.region.control, Control::Russia);
    }

    #[test]
    fn test_setback_applies_losses_and_clamps() {
        let weak = Brigade::new("b", "Weak", UnitType::Artillery, "x").with_stats(12, 5, 5, 0);
        let region = Region::new("r", "Fortress", Control::Russia, Terrain::Urban).with_enemy_strength(100);
        let result = resolve_combat_with_rolls(
            &weak,
            &region,
            Weather::Clear,
            Faction::Ukraine,
            &rolls(&[1], &[6, 6], 7, 7),
            &EngineConfig::default(),
        );
        assert_eq!(result.outcome, AttackOutcome::Setback);
        assert_eq!(result.attacker_losses, 10 + 7 + 10);
        assert_eq!(result.brigade.strength, 0);
        assert_eq!(result.brigade.morale, 0);
        assert_eq!(result.region.control, Control::Russia);
        assert_eq!(result.region.enemy_strength_estimate, 93);
    }

    #[test]
    fn test_markers_emitted() {
        let region = Region::new("r", "Sumy", Control::Contested, Terrain::Rural).with_enemy_strength(55);
        let result = resolve_combat(
            &veteran(),
            &region,
            Weather::Rain,
            Faction::Ukraine,
            &mut ScriptedRandom::new(vec![0.3, 0.7, 0.2, 0.4]),
            &EngineConfig::default(),
        );

        assert!(result.messages[0].starts_with("[COMBAT_START]93rd Mechanized Brigade|Sumy"));
        let results = result
            .messages
            .iter()
            .find_map(|m| parse_marker(m, COMBAT_RESULTS))
            .unwrap();
        assert_eq!(results[0], "93rd Mechanized Brigade");
        assert_eq!(results[1], result.attacker_losses.to_string());
        assert_eq!(results[3], "Sumy");
        let end = result.messages.last().unwrap();
        assert_eq!(parse_marker(end, COMBAT_END), Some(vec![result.outcome.label()]));
    }

    #[test]
    fn test_zero_estimate_region_uses_unit_denominator() {
        let region = Region::new("r", "Empty", Control::Russia, Terrain::Rural);
        let result = resolve_combat_with_rolls(
            &veteran(),
            &region,
            Weather::Clear,
            Faction::Ukraine,
            &rolls(&[1, 1, 1], &[6], 0, 0),
            &EngineConfig::default(),
        );
        assert!(result.attacker_power / result.defender_power.max(1.0) > 1.6);
        assert_eq!(result.outcome, AttackOutcome::Victory);
        assert_eq!(result.region.enemy_strength_estimate, 0);
    }
}
