//! Regions - nodes of the operational adjacency graph

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{clamp_stat, Control, Faction, RegionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[serde(rename = "urban")]
    Urban,
    #[serde(rename = "forest")]
    Forest,
    #[serde(rename = "rural")]
    Rural,
    #[serde(rename = "highway")]
    Highway,
    #[serde(rename = "river crossing")]
    RiverCrossing,
    #[serde(other)]
    Other,
}

impl Terrain {
    /// Multiplier applied to the defender of this region
    pub fn defense_bonus(self) -> f64 {
        match self {
            Self::Urban => 1.5,
            Self::RiverCrossing => 1.4,
            Self::Forest => 1.3,
            Self::Rural => 1.0,
            Self::Highway => 0.9,
            Self::Other => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Urban => "urban",
            Self::Forest => "forest",
            Self::Rural => "rural",
            Self::Highway => "highway",
            Self::RiverCrossing => "river crossing",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A territorial node
///
/// `enemy_strength_estimate` is the opposing faction's estimated power in the
/// region. It is the defender's power when the player attacks the region and
/// the attacker pool when the AI attacks out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub control: Control,
    pub terrain: Terrain,
    #[serde(default)]
    pub adjacency: Vec<RegionId>,
    pub enemy_strength_estimate: i32,
    pub base_supply: i32,
    #[serde(default)]
    pub is_objective: bool,
    #[serde(default)]
    pub artillery_intensity: i32,
    #[serde(default)]
    pub electronic_warfare_active: bool,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>, control: Control, terrain: Terrain) -> Self {
        Self {
            id: RegionId::new(id),
            name: name.into(),
            control,
            terrain,
            adjacency: Vec::new(),
            enemy_strength_estimate: 0,
            base_supply: 50,
            is_objective: false,
            artillery_intensity: 0,
            electronic_warfare_active: false,
        }
    }

    pub fn with_adjacency(mut self, neighbors: &[&str]) -> Self {
        self.adjacency = neighbors.iter().map(|n| RegionId::new(*n)).collect();
        self
    }

    pub fn with_enemy_strength(mut self, estimate: i32) -> Self {
        self.enemy_strength_estimate = clamp_stat(estimate);
        self
    }

    pub fn with_base_supply(mut self, base_supply: i32) -> Self {
        self.base_supply = base_supply;
        self
    }

    pub fn is_held_by(&self, faction: Faction) -> bool {
        self.control.is_held_by(faction)
    }

    pub fn is_adjacent_to(&self, other: &RegionId) -> bool {
        self.adjacency.contains(other)
    }

    /// Adjust the enemy estimate, keeping it inside [0, 100]
    pub fn shift_enemy_strength(&mut self, delta: i32) {
        self.enemy_strength_estimate = clamp_stat(self.enemy_strength_estimate + delta);
    }
}

/// Look up a region by id
pub fn find_region<'a>(regions: &'a [Region], id: &RegionId) -> Option<&'a Region> {
    regions.iter().find(|r| &r.id == id)
}

/// Look up a region by id for mutation
pub fn find_region_mut<'a>(regions: &'a mut [Region], id: &RegionId) -> Option<&'a mut Region> {
    regions.iter_mut().find(|r| &r.id == id)
}

/// Regions adjacent to `region` that exist on the map
pub fn neighbors_of<'a>(region: &'a Region, regions: &'a [Region]) -> impl Iterator<Item = &'a Region> + 'a {
    region
        .adjacency
        .iter()
        .filter_map(move |id| find_region(regions, id))
}
