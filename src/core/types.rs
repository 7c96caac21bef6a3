//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for every brigade stat and region estimate
pub const STAT_MIN: i32 = 0;

/// Upper bound for every brigade stat and region estimate
pub const STAT_MAX: i32 = 100;

/// Clamp a stat into the [0, 100] domain
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Unique identifier for brigades
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrigadeId(pub String);

impl BrigadeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrigadeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrigadeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for map regions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A playable side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Ukraine,
    Russia,
}

impl Faction {
    /// The side the AI plays when this faction is the player
    pub fn opponent(self) -> Self {
        match self {
            Self::Ukraine => Self::Russia,
            Self::Russia => Self::Ukraine,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ukraine => "ukraine",
            Self::Russia => "russia",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who holds a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Ukraine,
    Russia,
    Contested,
}

impl Control {
    pub fn faction(self) -> Option<Faction> {
        match self {
            Self::Ukraine => Some(Faction::Ukraine),
            Self::Russia => Some(Faction::Russia),
            Self::Contested => None,
        }
    }

    /// True if the region is firmly held by `faction` (contested never counts)
    pub fn is_held_by(self, faction: Faction) -> bool {
        self.faction() == Some(faction)
    }
}

impl From<Faction> for Control {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Ukraine => Self::Ukraine,
            Faction::Russia => Self::Russia,
        }
    }
}
