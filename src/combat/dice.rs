//! Dice phase
//!
//! Both sides roll a handful of d6 sorted high to low and compare them pair
//! by pair. The defender wins ties; unmatched dice do nothing.

use serde::{Deserialize, Serialize};

use crate::core::rng::RandomSource;

/// Attacker dice cap
pub const MAX_ATTACKER_DICE: usize = 3;
/// Defender dice cap
pub const MAX_DEFENDER_DICE: usize = 2;

/// Roll `count` d6, sorted descending
pub fn roll_dice<R: RandomSource + ?Sized>(rng: &mut R, count: usize) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count).map(|_| rng.roll_d6()).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Dice a side rolls for a given combat power
pub fn dice_count_for_power(power: f64, is_attacker: bool) -> usize {
    if is_attacker {
        if power >= 80.0 {
            3
        } else if power >= 40.0 {
            2
        } else {
            1
        }
    } else if power >= 60.0 {
        2
    } else {
        1
    }
}

/// One pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceComparison {
    pub attacker: u8,
    pub defender: u8,
    pub attacker_won: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceOutcome {
    pub attacker_wins: u32,
    pub defender_wins: u32,
    pub comparisons: Vec<DiceComparison>,
}

impl DiceOutcome {
    /// Attacker wins minus defender wins
    pub fn attacker_advantage(&self) -> i32 {
        self.attacker_wins as i32 - self.defender_wins as i32
    }
}

/// Compare two descending dice sequences
pub fn compare_dice(attacker: &[u8], defender: &[u8]) -> DiceOutcome {
    let mut outcome = DiceOutcome::default();

    for (&a, &d) in attacker.iter().zip(defender) {
        let attacker_won = a > d;
        if attacker_won {
            outcome.attacker_wins += 1;
        } else {
            outcome.defender_wins += 1;
        }
        outcome.comparisons.push(DiceComparison {
            attacker: a,
            defender: d,
            attacker_won,
        });
    }

    outcome
}

/// Every random input of one battle
///
/// Resolvers either draw these from a `RandomSource` or take them ready-made,
/// which pins an outcome exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRolls {
    pub attacker_dice: Vec<u8>,
    pub defender_dice: Vec<u8>,
    /// Extra losses suffered by the attacker
    pub attacker_jitter: i32,
    /// Extra losses suffered by the defender
    pub defender_jitter: i32,
}

impl CombatRolls {
    /// Draw order: attacker dice, defender dice, attacker jitter, defender jitter
    pub fn draw_attack<R: RandomSource + ?Sized>(
        rng: &mut R,
        attacker_count: usize,
        defender_count: usize,
        jitter_bound: u32,
    ) -> Self {
        let attacker_dice = roll_dice(rng, attacker_count);
        let defender_dice = roll_dice(rng, defender_count);
        let attacker_jitter = rng.below(jitter_bound) as i32;
        let defender_jitter = rng.below(jitter_bound) as i32;
        Self {
            attacker_dice,
            defender_dice,
            attacker_jitter,
            defender_jitter,
        }
    }

    /// Draw order when a player brigade defends: its dice first, then the
    /// attacker's, then its own jitter, then the attacker's
    pub fn draw_defense<R: RandomSource + ?Sized>(
        rng: &mut R,
        defender_count: usize,
        attacker_count: usize,
        jitter_bound: u32,
    ) -> Self {
        let defender_dice = roll_dice(rng, defender_count);
        let attacker_dice = roll_dice(rng, attacker_count);
        let defender_jitter = rng.below(jitter_bound) as i32;
        let attacker_jitter = rng.below(jitter_bound) as i32;
        Self {
            attacker_dice,
            defender_dice,
            attacker_jitter,
            defender_jitter,
        }
    }
}

/// `[5, 4, 3]` style rendering used in the turn log
pub fn format_dice(dice: &[u8]) -> String {
    let faces: Vec<String> = dice.iter().map(|d| d.to_string()).collect();
    format!("[{}]", faces.join(", "))
}
