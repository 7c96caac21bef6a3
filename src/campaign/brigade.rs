//! Brigades - the units the player commands

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{clamp_stat, BrigadeId, RegionId};

/// Unit type, each with its own combat-power multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "mechanized")]
    Mechanized,
    #[serde(rename = "armor")]
    Armor,
    #[serde(rename = "airborne", alias = "airmobile")]
    Airborne,
    #[serde(rename = "territorial defense")]
    TerritorialDefense,
    #[serde(rename = "artillery")]
    Artillery,
    /// Anything the rules don't recognize
    #[serde(other)]
    Other,
}

impl UnitType {
    pub fn power_multiplier(self) -> f64 {
        match self {
            Self::Armor => 1.3,
            Self::Mechanized => 1.2,
            Self::Airborne => 1.1,
            Self::TerritorialDefense => 0.9,
            Self::Artillery => 0.8,
            Self::Other => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mechanized => "mechanized",
            Self::Armor => "armor",
            Self::Airborne => "airborne",
            Self::TerritorialDefense => "territorial defense",
            Self::Artillery => "artillery",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standing posture of a brigade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stance {
    #[serde(rename = "hold")]
    #[default]
    Hold,
    #[serde(rename = "mobile defense")]
    MobileDefense,
    #[serde(rename = "counterattack")]
    Counterattack,
    #[serde(rename = "fallback")]
    Fallback,
    /// Offensive posture used by invasion rosters; fights at base power
    #[serde(rename = "offensive")]
    Offensive,
    #[serde(other)]
    Other,
}

impl Stance {
    /// Power multiplier when this brigade attacks
    pub fn attack_multiplier(self) -> f64 {
        match self {
            Self::Hold => 0.7,
            Self::MobileDefense => 0.9,
            Self::Counterattack => 1.3,
            Self::Fallback => 0.5,
            Self::Offensive | Self::Other => 1.0,
        }
    }

    /// Power multiplier when this brigade is attacked
    pub fn defense_multiplier(self) -> f64 {
        match self {
            Self::Hold => 1.3,
            Self::MobileDefense => 1.1,
            Self::Counterattack => 0.8,
            Self::Fallback => 0.9,
            Self::Offensive | Self::Other => 1.0,
        }
    }

    /// Short player-facing description of what the stance does
    pub fn impact_summary(self) -> &'static str {
        match self {
            Self::Hold => "+30% defense, -30% attack",
            Self::MobileDefense => "Balanced combat, can react",
            Self::Counterattack => "+30% attack, -20% defense",
            Self::Fallback => "Trading ground for survival",
            Self::Offensive => "Committed to the advance",
            Self::Other => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::MobileDefense => "mobile defense",
            Self::Counterattack => "counterattack",
            Self::Fallback => "fallback",
            Self::Offensive => "offensive",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A military unit with strength, morale, supply and experience in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brigade {
    pub id: BrigadeId,
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub strength: i32,
    pub morale: i32,
    pub supply: i32,
    pub experience: i32,
    #[serde(default)]
    pub stance: Stance,
    pub location: RegionId,
    #[serde(default)]
    pub drone_count: u32,
    #[serde(default)]
    pub anti_armor_rating: i32,
}

impl Brigade {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_type: UnitType,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: BrigadeId::new(id),
            name: name.into(),
            unit_type,
            strength: 100,
            morale: 100,
            supply: 100,
            experience: 0,
            stance: Stance::default(),
            location: RegionId::new(location),
            drone_count: 0,
            anti_armor_rating: 0,
        }
    }

    pub fn with_stats(mut self, strength: i32, morale: i32, supply: i32, experience: i32) -> Self {
        self.strength = strength;
        self.morale = morale;
        self.supply = supply;
        self.experience = experience;
        self.clamp_stats();
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }

    /// A zero-strength brigade stays on the books but cannot fight
    pub fn is_operational(&self) -> bool {
        self.strength > 0
    }

    pub fn clamp_stats(&mut self) {
        self.strength = clamp_stat(self.strength);
        self.morale = clamp_stat(self.morale);
        self.supply = clamp_stat(self.supply);
        self.experience = clamp_stat(self.experience);
        self.anti_armor_rating = clamp_stat(self.anti_armor_rating);
    }

    pub fn stats_in_range(&self) -> bool {
        [
            self.strength,
            self.morale,
            self.supply,
            self.experience,
            self.anti_armor_rating,
        ]
        .iter()
        .all(|v| (0..=100).contains(v))
    }
}
