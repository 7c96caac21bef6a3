//! Applying AI decisions to the map and the player's brigades

use crate::ai::decision::{AiAction, AiActionKind};
use crate::campaign::brigade::Brigade;
use crate::campaign::region::{find_region_mut, Region};
use crate::core::rng::RandomSource;
use crate::core::types::{clamp_stat, Control, Faction};

/// Assault must exceed this multiple of the defending strength to break through
pub const BREAKTHROUGH_RATIO: f64 = 1.5;
/// Share of the assault left holding a captured region
pub const OCCUPATION_SHARE: f64 = 0.6;
/// Share of a repelled assault that still lingers in the target region
pub const REPELLED_BUILDUP_SHARE: f64 = 0.2;

const BREAKTHROUGH_MORALE_LOSS: i32 = 15;
const REPELLED_MORALE_LOSS: i32 = 5;

/// Apply one AI action in place, returning any log lines
///
/// An attack into a region with no brigades has no effect here; the region
/// only changes hands through a breakthrough against defenders.
pub fn apply_ai_action<R: RandomSource + ?Sized>(
    action: &AiAction,
    regions: &mut [Region],
    brigades: &mut [Brigade],
    ai: Faction,
    rng: &mut R,
) -> Vec<String> {
    let mut messages = Vec::new();

    match action.kind {
        AiActionKind::Hold => {}
        AiActionKind::Reinforce => {
            let Some(target_id) = &action.target else {
                return messages;
            };
            let amount = action.intensity as i32;
            match find_region_mut(regions, target_id) {
                Some(target) => {
                    target.enemy_strength_estimate = (target.enemy_strength_estimate + amount).min(100);
                }
                None => {
                    tracing::warn!(target = %target_id, "AI reinforcement target missing");
                    return messages;
                }
            }
            if let Some(source) = find_region_mut(regions, &action.source) {
                source.enemy_strength_estimate = (source.enemy_strength_estimate - amount).max(0);
            }
        }
        AiActionKind::Attack => {
            let Some(target_id) = &action.target else {
                return messages;
            };
            let Some(target) = find_region_mut(regions, target_id) else {
                tracing::warn!(target = %target_id, "AI attack target missing");
                return messages;
            };

            let total_defense: i32 = brigades
                .iter()
                .filter(|b| &b.location == target_id)
                .map(|b| b.strength)
                .sum();
            if !brigades.iter().any(|b| &b.location == target_id) {
                tracing::debug!(target = %target_id, "AI attack into an empty region");
                return messages;
            }

            let breakthrough = action.intensity > total_defense as f64 * BREAKTHROUGH_RATIO;
            let (base_loss, loss_spread, morale_loss) = if breakthrough {
                target.control = Control::from(ai);
                target.enemy_strength_estimate = ((action.intensity * OCCUPATION_SHARE).floor() as i32).min(100);
                messages.push(format!("[ENEMY] CRITICAL: Enemy forces have seized {}!", target.name));
                (20.0, 15.0, BREAKTHROUGH_MORALE_LOSS)
            } else {
                let buildup = (action.intensity * REPELLED_BUILDUP_SHARE).floor() as i32;
                target.enemy_strength_estimate = (target.enemy_strength_estimate + buildup).min(100);
                messages.push(format!("[ENEMY] Enemy attack on {} repelled, but at a cost.", target.name));
                (8.0, 10.0, REPELLED_MORALE_LOSS)
            };

            let mut total_casualties = 0;
            for brigade in brigades.iter_mut().filter(|b| &b.location == target_id) {
                let casualty = (base_loss + rng.next_unit() * loss_spread).floor() as i32;
                total_casualties += casualty;
                brigade.strength = clamp_stat(brigade.strength - casualty);
                brigade.morale = clamp_stat(brigade.morale - morale_loss);
            }

            if breakthrough {
                messages.push(format!(
                    "[ENEMY] Your forces suffered heavy losses. (-{} total strength, -{} morale)",
                    total_casualties, morale_loss
                ));
            } else {
                messages.push(format!(
                    "[ENEMY] Defensive casualties taken. (-{} total strength, -{} morale)",
                    total_casualties, morale_loss
                ));
            }
        }
    }

    messages
}
