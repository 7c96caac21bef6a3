//! End-of-turn victory and defeat checks

use crate::campaign::state::GameState;
use crate::core::types::RegionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignOutcome {
    Ongoing,
    Victory(String),
    Defeat(String),
}

impl CampaignOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, Self::Victory(_))
    }

    /// Banner line for the turn log
    pub fn banner(&self) -> Option<String> {
        match self {
            Self::Ongoing => None,
            Self::Victory(reason) => Some(format!("*** VICTORY: {} ***", reason)),
            Self::Defeat(reason) => Some(format!("*** DEFEAT: {} ***", reason)),
        }
    }
}

fn held_by_player(state: &GameState, id: &RegionId) -> bool {
    state
        .region(id)
        .map(|r| r.is_held_by(state.player_faction))
        .unwrap_or(false)
}

fn region_name(state: &GameState, id: &RegionId) -> String {
    state
        .region(id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Check the objective data against `state`
///
/// Uses `state.turn` as the turn that has just been resolved. Defeat
/// conditions are checked before any victory condition.
pub fn evaluate_victory(state: &GameState) -> CampaignOutcome {
    let conditions = &state.victory_conditions;

    if state.brigades.iter().all(|b| b.strength <= 0) {
        return CampaignOutcome::Defeat("All brigades have been destroyed.".to_string());
    }

    for id in &conditions.must_hold {
        if state.region(id).is_none() {
            tracing::warn!(region = %id, "objective region missing from map, counted as lost");
        }
        if !held_by_player(state, id) {
            return CampaignOutcome::Defeat(format!("{} has fallen to enemy forces.", region_name(state, id)));
        }
    }

    if !conditions.capture_to_win.is_empty() && conditions.capture_to_win.iter().all(|id| held_by_player(state, id)) {
        let names: Vec<String> = conditions
            .capture_to_win
            .iter()
            .map(|id| region_name(state, id))
            .collect();
        return CampaignOutcome::Victory(format!("{} captured!", names.join(", ")));
    }

    if state.turn >= conditions.turn_limit {
        let held = conditions
            .strategic
            .iter()
            .filter(|id| held_by_player(state, id))
            .count();
        let total = conditions.strategic.len();
        return if held >= conditions.strategic_threshold {
            CampaignOutcome::Victory(format!("Strategic objectives secured ({held}/{total})."))
        } else {
            CampaignOutcome::Defeat(format!(
                "Strategic objectives not secured ({held}/{total}, needed {}).",
                conditions.strategic_threshold
            ))
        };
    }

    CampaignOutcome::Ongoing
}
