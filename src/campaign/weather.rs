//! Weather system for the operational layer
//!
//! One weather state is rolled per turn. Weather cuts supply throughput and
//! blunts whichever side is attacking.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::rng::RandomSource;

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    HeavyRain,
    Mud,
    Snow,
    Fog,
}

/// Weather roll weights, in the order of `Weather::ALL`
pub const WEATHER_WEIGHTS: [f64; 6] = [35.0, 20.0, 10.0, 15.0, 10.0, 10.0];

impl Weather {
    pub const ALL: [Weather; 6] = [
        Self::Clear,
        Self::Rain,
        Self::HeavyRain,
        Self::Mud,
        Self::Snow,
        Self::Fog,
    ];

    /// Fraction of supply throughput lost (0.0 - 0.35)
    pub fn supply_penalty(self) -> f64 {
        match self {
            Self::Clear => 0.0,
            Self::Rain => 0.1,
            Self::HeavyRain => 0.2,
            Self::Mud => 0.35,
            Self::Snow => 0.15,
            Self::Fog => 0.0,
        }
    }

    /// Multiplier on the attacking side's power
    pub fn combat_multiplier(self) -> f64 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 0.9,
            Self::HeavyRain => 0.75,
            Self::Mud => 0.7,
            Self::Snow => 0.85,
            Self::Fog => 0.9,
        }
    }

    /// Ground conditions that discourage offensives
    pub fn hampers_offensive(self) -> bool {
        matches!(self, Self::Mud | Self::HeavyRain)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Rain => "RAIN",
            Self::HeavyRain => "HEAVY_RAIN",
            Self::Mud => "MUD",
            Self::Snow => "SNOW",
            Self::Fog => "FOG",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roll this turn's weather with a single draw
pub fn roll_weather<R: RandomSource + ?Sized>(rng: &mut R) -> Weather {
    let total: f64 = WEATHER_WEIGHTS.iter().sum();
    let roll = rng.next_unit() * total;

    let mut cumulative = 0.0;
    for (weather, weight) in Weather::ALL.iter().zip(WEATHER_WEIGHTS) {
        cumulative += weight;
        if roll < cumulative {
            return *weather;
        }
    }
    Weather::Clear
}
