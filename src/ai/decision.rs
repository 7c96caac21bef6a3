//! Per-region decisions for the opposing faction
//!
//! Every AI-held region independently rolls whether it acts this turn, then
//! picks hold, attack or reinforce by weighted draw. Weights depend on the
//! region's strength, what borders it and the weather.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::campaign::brigade::Brigade;
use crate::campaign::region::{neighbors_of, Region};
use crate::campaign::weather::Weather;
use crate::core::config::Difficulty;
use crate::core::rng::RandomSource;
use crate::core::types::{Faction, RegionId};

/// Base weights for the three region actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionWeights {
    pub hold: f64,
    pub attack: f64,
    pub reinforce: f64,
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            hold: HOLD_WEIGHT,
            attack: 0.0,
            reinforce: 0.0,
        }
    }
}

pub const HOLD_WEIGHT: f64 = 30.0;
/// Attack weight when the region clearly outmatches the weakest target
pub const ATTACK_WEIGHT_STRONG: f64 = 40.0;
/// Attack weight when the region merely outmatches it
pub const ATTACK_WEIGHT_EVEN: f64 = 25.0;
pub const REINFORCE_WEIGHT: f64 = 20.0;

/// Minimum scaled strength before a region considers attacking
pub const ATTACK_STRENGTH_FLOOR: f64 = 60.0;
/// Minimum scaled strength before a region considers reinforcing
pub const REINFORCE_STRENGTH_FLOOR: f64 = 70.0;
/// Share of a region's strength sent as reinforcements
pub const REINFORCE_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiActionKind {
    Hold,
    Attack,
    Reinforce,
}

impl fmt::Display for AiActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hold => "hold",
            Self::Attack => "attack",
            Self::Reinforce => "reinforce",
        };
        f.write_str(label)
    }
}

/// A decided action for one AI region
///
/// For attacks `intensity` is the assault strength; for reinforcements it is
/// the amount moved to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAction {
    pub source: RegionId,
    pub kind: AiActionKind,
    pub target: Option<RegionId>,
    pub intensity: f64,
}

impl AiAction {
    pub fn hold(source: RegionId) -> Self {
        Self {
            source,
            kind: AiActionKind::Hold,
            target: None,
            intensity: 0.0,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.kind == AiActionKind::Attack
    }
}

/// Decided actions plus the log lines announcing them
#[derive(Debug, Clone, Default)]
pub struct AiDecisions {
    pub actions: Vec<AiAction>,
    pub messages: Vec<String>,
}

/// Summed strength of the brigades standing in `region`
pub fn defending_strength(brigades: &[Brigade], region: &RegionId) -> i32 {
    brigades
        .iter()
        .filter(|b| &b.location == region)
        .map(|b| b.strength)
        .sum()
}

/// True if any neighbour of `region` is held by `faction`
fn borders(region: &Region, regions: &[Region], faction: Faction) -> bool {
    neighbors_of(region, regions).any(|n| n.is_held_by(faction))
}

/// Action weights for one AI region at the given scaled strength
pub fn region_weights(
    region: &Region,
    strength: f64,
    regions: &[Region],
    brigades: &[Brigade],
    weather: Weather,
    ai: Faction,
) -> ActionWeights {
    let player = ai.opponent();
    let mut weights = ActionWeights::default();

    if strength > ATTACK_STRENGTH_FLOOR {
        let weakest = neighbors_of(region, regions)
            .filter(|n| n.is_held_by(player))
            .map(|n| defending_strength(brigades, &n.id))
            .min();
        if let Some(weakest) = weakest {
            let weakest = weakest as f64;
            weights.attack = if strength > weakest * 1.3 {
                ATTACK_WEIGHT_STRONG
            } else if strength > weakest {
                ATTACK_WEIGHT_EVEN
            } else {
                0.0
            };
        }
    }

    if strength > REINFORCE_STRENGTH_FLOOR
        && neighbors_of(region, regions).any(|n| n.is_held_by(ai) && borders(n, regions, player))
    {
        weights.reinforce = REINFORCE_WEIGHT;
    }

    if weather.hampers_offensive() {
        weights.attack *= 0.5;
        weights.hold *= 1.5;
    }

    weights
}

/// Weighted draw over hold, attack, reinforce; zero weights are never picked
pub fn choose_action<R: RandomSource + ?Sized>(weights: &ActionWeights, rng: &mut R) -> AiActionKind {
    let options = [
        (AiActionKind::Hold, weights.hold),
        (AiActionKind::Attack, weights.attack),
        (AiActionKind::Reinforce, weights.reinforce),
    ];
    let total: f64 = options.iter().map(|(_, w)| w.max(0.0)).sum();
    let roll = rng.next_unit() * total;

    let mut cumulative = 0.0;
    for (kind, weight) in options {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if roll < cumulative {
            return kind;
        }
    }
    AiActionKind::Hold
}

/// Decide actions for every AI-held region, in map order
pub fn compute_ai_actions<R: RandomSource + ?Sized>(
    regions: &[Region],
    brigades: &[Brigade],
    weather: Weather,
    difficulty: &Difficulty,
    player: Faction,
    rng: &mut R,
) -> AiDecisions {
    let ai = player.opponent();
    let mut decisions = AiDecisions::default();

    for region in regions.iter().filter(|r| r.is_held_by(ai)) {
        let strength = region.enemy_strength_estimate as f64 * difficulty.enemy_strength_modifier;

        if rng.next_unit() > difficulty.enemy_activity_modifier {
            tracing::debug!(region = %region.id, "AI region inactive this turn");
            continue;
        }

        let weights = region_weights(region, strength, regions, brigades, weather, ai);
        let kind = choose_action(&weights, rng);

        match kind {
            AiActionKind::Attack => {
                let targets: Vec<&Region> = neighbors_of(region, regions).filter(|n| n.is_held_by(player)).collect();
                let Some(target) = rng.pick_index(targets.len()).map(|i| targets[i]) else {
                    continue;
                };
                decisions.messages.push(format!(
                    "[ENEMY] Enemy forces from {} launch attack on {}. (Assault strength: {})",
                    region.name,
                    target.name,
                    strength.floor()
                ));
                decisions.actions.push(AiAction {
                    source: region.id.clone(),
                    kind,
                    target: Some(target.id.clone()),
                    intensity: strength,
                });
            }
            AiActionKind::Reinforce => {
                let targets: Vec<&Region> = neighbors_of(region, regions)
                    .filter(|n| n.is_held_by(ai) && borders(n, regions, player))
                    .collect();
                let Some(target) = rng.pick_index(targets.len()).map(|i| targets[i]) else {
                    continue;
                };
                let amount = (strength * REINFORCE_SHARE).floor();
                decisions.messages.push(format!(
                    "[ENEMY] Enemy reinforcing {}. (+{} enemy strength)",
                    target.name, amount
                ));
                decisions.actions.push(AiAction {
                    source: region.id.clone(),
                    kind,
                    target: Some(target.id.clone()),
                    intensity: amount,
                });
            }
            AiActionKind::Hold => {
                tracing::debug!(region = %region.id, ?weights, "AI region holds");
                decisions.actions.push(AiAction::hold(region.id.clone()));
            }
        }
    }

    decisions
}
