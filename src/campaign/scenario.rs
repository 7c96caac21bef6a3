//! Scenario loading and campaign start
//!
//! A scenario bundles the map, the player's order of battle, the objective
//! data and the opening briefing. The two built-in scenarios are embedded at
//! compile time; custom ones load from TOML files.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::campaign::brigade::Brigade;
use crate::campaign::region::{find_region, Region};
use crate::campaign::state::{GameState, VictoryConditions};
use crate::campaign::weather::roll_weather;
use crate::core::config::Difficulty;
use crate::core::error::{FrontlineError, Result};
use crate::core::rng::RandomSource;
use crate::core::types::Faction;

const DEFENSE_TOML: &str = include_str!("../../data/scenarios/defense.toml");
const OFFENSIVE_TOML: &str = include_str!("../../data/scenarios/offensive.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub player_faction: Faction,
    #[serde(default)]
    pub briefing: Vec<String>,
    pub victory: VictoryConditions,
    pub regions: Vec<Region>,
    pub brigades: Vec<Brigade>,
}

impl Scenario {
    /// Ukrainian defensive campaign
    pub fn defense() -> Result<Self> {
        Self::from_toml_str(DEFENSE_TOML)
    }

    /// Russian offensive campaign
    pub fn offensive() -> Result<Self> {
        Self::from_toml_str(OFFENSIVE_TOML)
    }

    /// Built-in scenario in which `faction` is the player
    pub fn for_faction(faction: Faction) -> Result<Self> {
        match faction {
            Faction::Ukraine => Self::defense(),
            Faction::Russia => Self::offensive(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check referential integrity of the map, roster and objectives
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(FrontlineError::Scenario(format!("{}: map has no regions", self.id)));
        }
        if self.brigades.is_empty() {
            return Err(FrontlineError::Scenario(format!("{}: roster has no brigades", self.id)));
        }

        let mut region_ids = AHashSet::new();
        for region in &self.regions {
            if !region_ids.insert(&region.id) {
                return Err(FrontlineError::Scenario(format!("duplicate region id {}", region.id)));
            }
        }

        for region in &self.regions {
            if let Some(missing) = region.adjacency.iter().find(|id| !region_ids.contains(id)) {
                return Err(FrontlineError::Scenario(format!(
                    "region {} lists unknown neighbour {}",
                    region.id, missing
                )));
            }
            if !(0..=100).contains(&region.enemy_strength_estimate) {
                return Err(FrontlineError::Scenario(format!(
                    "region {} estimate {} outside [0, 100]",
                    region.id, region.enemy_strength_estimate
                )));
            }
        }

        let mut brigade_ids = AHashSet::new();
        for brigade in &self.brigades {
            if !brigade_ids.insert(&brigade.id) {
                return Err(FrontlineError::Scenario(format!("duplicate brigade id {}", brigade.id)));
            }
            if find_region(&self.regions, &brigade.location).is_none() {
                return Err(FrontlineError::Scenario(format!(
                    "brigade {} starts in unknown region {}",
                    brigade.id, brigade.location
                )));
            }
            if !brigade.stats_in_range() {
                return Err(FrontlineError::Scenario(format!("brigade {} has stats outside [0, 100]", brigade.id)));
            }
        }

        if let Some(missing) = self.victory.referenced_regions().find(|id| !region_ids.contains(id)) {
            return Err(FrontlineError::Scenario(format!("victory conditions name unknown region {}", missing)));
        }

        Ok(())
    }

    /// Start a fresh campaign from this scenario
    ///
    /// Roster and map are deep copies; every brigade starts with the
    /// difficulty's drone allotment and the opening weather is rolled.
    pub fn new_game<R: RandomSource + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> GameState {
        let brigades = self
            .brigades
            .iter()
            .cloned()
            .map(|mut b| {
                b.drone_count = difficulty.starting_drones;
                b
            })
            .collect();

        let weather = roll_weather(rng);
        tracing::info!(
            scenario = %self.id,
            faction = %self.player_faction,
            difficulty = %difficulty.name,
            %weather,
            "campaign started"
        );

        GameState {
            turn: 1,
            brigades,
            regions: self.regions.clone(),
            weather,
            player_faction: self.player_faction,
            enemy_drones: difficulty.starting_drones,
            difficulty,
            victory_conditions: self.victory.clone(),
            event_log: self.briefing.clone(),
            orders: Vec::new(),
            game_over: false,
            victory: false,
        }
    }
}
