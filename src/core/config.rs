//! Engine configuration with documented constants
//!
//! Difficulty modifiers are data consumed verbatim by the supply, AI and
//! event systems. Engine constants the rules leave open
//! (supply costs, loss dice) live in `EngineConfig`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{FrontlineError, Result};

/// Upper bound for the per-turn drone regen and starting drone fields
pub const MAX_DRONE_SETTING: u32 = 100;

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Normal,
    Hard,
}

/// Numeric modifiers describing how hard a campaign is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Scales AI region strength before every AI decision
    pub enemy_strength_modifier: f64,
    /// Scales the effective supply rate of player brigades
    pub player_supply_modifier: f64,
    /// Probability that an AI region acts at all in a turn
    pub enemy_activity_modifier: f64,
    /// Scales the per-trigger event chance
    pub event_frequency_modifier: f64,
    /// Drones regained per player brigade per turn
    pub player_drone_regen: u32,
    /// Drones regained by the enemy pool per turn
    pub enemy_drone_regen: u32,
    /// Drones every player brigade starts the campaign with
    pub starting_drones: u32,
}

impl Difficulty {
    pub fn easy() -> Self {
        Self {
            id: "EASY".to_string(),
            name: "Recruit".to_string(),
            description: "Weaker enemy forces, better supply.".to_string(),
            enemy_strength_modifier: 0.7,
            player_supply_modifier: 1.3,
            enemy_activity_modifier: 0.6,
            event_frequency_modifier: 0.5,
            player_drone_regen: 2,
            enemy_drone_regen: 1,
            starting_drones: 6,
        }
    }

    pub fn normal() -> Self {
        Self {
            id: "NORMAL".to_string(),
            name: "Veteran".to_string(),
            description: "Realistic enemy strength and supply conditions.".to_string(),
            enemy_strength_modifier: 1.0,
            player_supply_modifier: 1.0,
            enemy_activity_modifier: 0.8,
            event_frequency_modifier: 1.0,
            player_drone_regen: 1,
            enemy_drone_regen: 1,
            starting_drones: 4,
        }
    }

    pub fn hard() -> Self {
        Self {
            id: "HARD".to_string(),
            name: "Elite".to_string(),
            description: "Strong enemy forces, challenging logistics.".to_string(),
            enemy_strength_modifier: 1.3,
            player_supply_modifier: 0.8,
            enemy_activity_modifier: 1.0,
            event_frequency_modifier: 1.5,
            player_drone_regen: 1,
            enemy_drone_regen: 2,
            starting_drones: 3,
        }
    }

    pub fn preset(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Easy => Self::easy(),
            DifficultyLevel::Normal => Self::normal(),
            DifficultyLevel::Hard => Self::hard(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let difficulty: Difficulty = toml::from_str(contents)?;
        difficulty.validate()?;
        Ok(difficulty)
    }

    /// Load a custom difficulty from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let modifiers = [
            ("enemy_strength_modifier", self.enemy_strength_modifier),
            ("player_supply_modifier", self.player_supply_modifier),
            ("enemy_activity_modifier", self.enemy_activity_modifier),
            ("event_frequency_modifier", self.event_frequency_modifier),
        ];
        for (name, value) in modifiers {
            if !value.is_finite() || value < 0.0 {
                return Err(FrontlineError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        let drones = [
            ("player_drone_regen", self.player_drone_regen),
            ("enemy_drone_regen", self.enemy_drone_regen),
            ("starting_drones", self.starting_drones),
        ];
        for (name, value) in drones {
            if value > MAX_DRONE_SETTING {
                return Err(FrontlineError::Config(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_DRONE_SETTING, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::normal()
    }
}

/// Engine constants for turn resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Supply spent by a move or reinforce order
    pub movement_supply_cost: i32,

    /// Supply spent by an attack order
    ///
    /// Two historical rule sets charged 15 and 20. 15 is canonical here.
    pub combat_supply_cost: i32,

    /// Chance that an event trigger point fires at all, before the
    /// difficulty's event frequency modifier is applied
    pub base_event_chance: f64,

    /// Maximum drones held by a brigade or by the enemy pool
    pub drone_cap: u32,

    /// Strength lost per opposing die won when attacking a region
    pub attack_loss_per_die: i32,

    /// Strength lost per opposing die won in a defensive battle
    pub defense_loss_per_die: i32,

    /// Exclusive upper bound of the random loss added in attacks
    pub attack_loss_jitter: u32,

    /// Exclusive upper bound of the random loss added in defensive battles
    pub defense_loss_jitter: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            movement_supply_cost: 10,
            combat_supply_cost: 15,
            base_event_chance: 0.15,
            drone_cap: 8,
            attack_loss_per_die: 10,
            defense_loss_per_die: 8,
            attack_loss_jitter: 8,
            defense_loss_jitter: 6,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.base_event_chance) {
            return Err(FrontlineError::Config(format!(
                "base_event_chance ({}) must be within [0, 1]",
                self.base_event_chance
            )));
        }

        if self.movement_supply_cost < 0 || self.combat_supply_cost < 0 {
            return Err(FrontlineError::Config("Supply costs must not be negative".into()));
        }

        if self.attack_loss_per_die < 0 || self.defense_loss_per_die < 0 {
            return Err(FrontlineError::Config("Loss per die must not be negative".into()));
        }

        Ok(())
    }
}
