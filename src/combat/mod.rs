//! Combat resolution
//!
//! Player attacks on regions (`attack`) and AI assaults on player brigades
//! (`defense`) share the dice phase, the power model and the log markers.

pub mod attack;
pub mod defense;
pub mod dice;
pub mod power;
pub mod report;

pub use attack::{resolve_combat, resolve_combat_with_rolls, AttackOutcome, CombatResult};
pub use defense::{resolve_defensive_battle, resolve_defensive_battle_with_rolls, DefenseOutcome, DefenseResult};
pub use dice::{compare_dice, dice_count_for_power, roll_dice, CombatRolls, DiceComparison, DiceOutcome};
pub use power::brigade_power;
