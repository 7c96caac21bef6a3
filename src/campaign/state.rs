//! Campaign state - the root aggregate handed to each turn resolution

use serde::{Deserialize, Serialize};

use crate::campaign::brigade::Brigade;
use crate::campaign::order::Order;
use crate::campaign::region::{find_region, find_region_mut, Region};
use crate::campaign::weather::Weather;
use crate::core::config::Difficulty;
use crate::core::types::{BrigadeId, Faction, RegionId};

/// Objective data for a scenario
///
/// Evaluated after every turn, see `turn::victory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictoryConditions {
    /// Losing any of these regions ends the campaign in defeat
    #[serde(default)]
    pub must_hold: Vec<RegionId>,
    /// Holding all of these wins outright
    #[serde(default)]
    pub capture_to_win: Vec<RegionId>,
    /// Regions counted at the turn limit
    #[serde(default)]
    pub strategic: Vec<RegionId>,
    #[serde(default)]
    pub strategic_threshold: usize,
    pub turn_limit: u32,
}

impl Default for VictoryConditions {
    fn default() -> Self {
        Self {
            must_hold: Vec::new(),
            capture_to_win: Vec::new(),
            strategic: Vec::new(),
            strategic_threshold: 0,
            turn_limit: 20,
        }
    }
}

impl VictoryConditions {
    /// Every region id the conditions refer to
    pub fn referenced_regions(&self) -> impl Iterator<Item = &RegionId> {
        self.must_hold
            .iter()
            .chain(self.capture_to_win.iter())
            .chain(self.strategic.iter())
    }
}

/// Complete campaign state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    pub brigades: Vec<Brigade>,
    pub regions: Vec<Region>,
    pub weather: Weather,
    pub player_faction: Faction,
    pub difficulty: Difficulty,
    pub victory_conditions: VictoryConditions,
    /// Append-only narrative across the whole campaign
    #[serde(default)]
    pub event_log: Vec<String>,
    /// Orders queued for the next resolution, in submission order
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub enemy_drones: u32,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub victory: bool,
}

impl GameState {
    pub fn ai_faction(&self) -> Faction {
        self.player_faction.opponent()
    }

    pub fn brigade(&self, id: &BrigadeId) -> Option<&Brigade> {
        self.brigades.iter().find(|b| &b.id == id)
    }

    pub fn brigade_mut(&mut self, id: &BrigadeId) -> Option<&mut Brigade> {
        self.brigades.iter_mut().find(|b| &b.id == id)
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        find_region(&self.regions, id)
    }

    pub fn region_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        find_region_mut(&mut self.regions, id)
    }

    /// Brigades currently located in `region`
    pub fn brigades_in<'a>(&'a self, region: &'a RegionId) -> impl Iterator<Item = &'a Brigade> + 'a {
        self.brigades.iter().filter(move |b| &b.location == region)
    }

    /// Number of regions held by the player
    pub fn player_held_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| r.is_held_by(self.player_faction))
            .count()
    }

    /// Sum of strength across all player brigades
    pub fn total_strength(&self) -> i32 {
        self.brigades.iter().map(|b| b.strength).sum()
    }
}
