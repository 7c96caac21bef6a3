//! Player brigade defending against an AI assault
//!
//! The region's enemy estimate is the assault force. A defensive battle
//! never changes control; the AI breakthrough check does that.

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
use crate::core::types::clamp_stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseOutcome {
    StrongDefense,
    PositionHeld,
    HardFought,
    HeavyLosses,
}

impl DefenseOutcome {
    /// `net_dice` counts from the defender's side
    pub fn classify(net_dice: i32, ratio: f64) -> Self {
        if net_dice >= 2 || (net_dice >= 1 && ratio > 1.3) {
            Self::StrongDefense
        } else if net_dice >= 1 || ratio > 1.0 {
            Self::PositionHeld
        } else if net_dice == 0 {
            Self::HardFought
        } else {
            Self::HeavyLosses
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StrongDefense => "STRONG DEFENSE",
            Self::PositionHeld => "POSITION HELD",
            Self::HardFought => "HARD FOUGHT",
            Self::HeavyLosses => "HEAVY LOSSES",
        }
    }

    /// Extra (defender, attacker) losses
    pub fn bonus_losses(self) -> (i32, i32) {
        match self {
            Self::StrongDefense => (0, 15),
            Self::PositionHeld => (0, 8),
            Self::HardFought => (5, 0),
            Self::HeavyLosses => (10, 0),
        }
    }

    pub fn morale_change(self) -> i32 {
        match self {
            Self::StrongDefense => 8,
            Self::PositionHeld => 3,
            Self::HardFought => -3,
            Self::HeavyLosses => -8,
        }
    }

    fn narration(self) -> &'static str {
        match self {
            Self::StrongDefense => "STRONG DEFENSE! Enemy attack shattered with minimal losses.",
            Self::PositionHeld => "POSITION HELD: Enemy attack repulsed despite heavy pressure.",
            Self::HardFought => "HARD FOUGHT: Significant casualties but position maintained.",
            Self::HeavyLosses => "HEAVY LOSSES: Brigade badly mauled but holds position.",
        }
    }
}

impl fmt::Display for DefenseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct DefenseResult {
    pub brigade: Brigade,
    pub region: Region,
    pub outcome: DefenseOutcome,
    pub defender_power: f64,
    pub attacker_power: f64,
    pub dice: DiceOutcome,
    pub brigade_losses: i32,
    pub enemy_losses: i32,
    pub morale_change: i32,
    pub messages: Vec<String>,
}

/// Defending power: base power, then supply tier, stance
pub fn defending_power(brigade: &Brigade) -> f64 {
    apply_supply_to_combat(brigade_power(brigade), brigade.supply) * brigade.stance.defense_multiplier()
}

/// Assault power coming out of a region; weather hits the attacker
pub fn assault_power(region: &Region, weather: Weather) -> f64 {
    region.enemy_strength_estimate as f64 * weather.combat_multiplier()
}

pub fn resolve_defensive_battle<R: RandomSource + ?Sized>(
    defender: &Brigade,
    region: &Region,
    weather: Weather,
    rng: &mut R,
    config: &EngineConfig,
) -> DefenseResult {
    let defender_dice = dice_count_for_power(defending_power(defender), false);
    let attacker_dice = dice_count_for_power(assault_power(region, weather), true);
    let rolls = CombatRolls::draw_defense(rng, defender_dice, attacker_dice, config.defense_loss_jitter);
    resolve_defensive_battle_with_rolls(defender, region, weather, &rolls, config)
}

pub fn resolve_defensive_battle_with_rolls(
    defender: &Brigade,
    region: &Region,
    weather: Weather,
    rolls: &CombatRolls,
    config: &EngineConfig,
) -> DefenseResult {
    let defender_power = defending_power(defender);
    let attacker_power = assault_power(region, weather);
    let ratio = defender_power / attacker_power.max(1.0);

    let mut messages = vec![
        report::combat_start(&region.name, &defender.name),
        format!("=== DEFENSE: {} under attack ===", defender.name),
        format!("Defender Power: {} (Stance: {})", defender_power.round(), defender.stance),
        format!(
            "Attacker Power: {} (Enemy: {})",
            attacker_power.round(),
            region.enemy_strength_estimate
        ),
        report::dice_roll_line("Defender", &rolls.defender_dice),
        report::dice_roll_line("Attacker", &rolls.attacker_dice),
    ];

    let dice = compare_dice(&rolls.attacker_dice, &rolls.defender_dice);
    messages.extend(report::comparison_lines(&dice));
    messages.push(format!("Defense Ratio: {:.2}:1", ratio));

    let outcome = DefenseOutcome::classify(-dice.attacker_advantage(), ratio);
    let (defender_bonus, attacker_bonus) = outcome.bonus_losses();
    let brigade_losses = dice.attacker_wins as i32 * config.defense_loss_per_die + rolls.defender_jitter + defender_bonus;
    let enemy_losses = dice.defender_wins as i32 * config.defense_loss_per_die + rolls.attacker_jitter + attacker_bonus;
    let morale_change = outcome.morale_change();

    messages.push(outcome.narration().to_string());
    messages.push(format!("Casualties: Your forces -{}, Enemy -{}", brigade_losses, enemy_losses));
    messages.push(format!("Morale change: {}", report::signed(morale_change)));
    messages.push(report::combat_results(
        &defender.name,
        brigade_losses,
        morale_change,
        &region.name,
        enemy_losses,
    ));
    messages.push(report::combat_end(outcome.label()));

    tracing::debug!(
        brigade = %defender.id,
        region = %region.id,
        outcome = %outcome,
        ratio,
        brigade_losses,
        enemy_losses,
        "defensive battle resolved"
    );

    DefenseResult {
        brigade: Brigade {
            strength: clamp_stat(defender.strength - brigade_losses),
            morale: clamp_stat(defender.morale + morale_change),
            experience: clamp_stat(defender.experience + 1),
            ..defender.clone()
        },
        region: Region {
            enemy_strength_estimate: (region.enemy_strength_estimate - enemy_losses).max(0),
            ..region.clone()
        },
        outcome,
        defender_power,
        attacker_power,
        dice,
        brigade_losses,
        enemy_losses,
        morale_change,
        messages,
    }
}
