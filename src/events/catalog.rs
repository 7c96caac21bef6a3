//! Event definitions and the three event pools

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{FrontlineError, Result};
use crate::core::types::Faction;

const BUILTIN_EVENTS_TOML: &str = include_str!("../../data/events.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    TurnStart,
    TurnEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    SingleBrigade,
    AllBrigades,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    MoraleChange,
    SupplyChange,
    StrengthBoost,
    FullRecovery,
    AntiArmorBoost,
    CombatBuff,
    CombatDebuff,
    EwIntensify,
    EnemyWeakening,
    EnemySupplyDisrupt,
    ArtillerySuccess,
    IntelBonus,
    WeatherIntensify,
}

impl EffectType {
    /// Scopes an effect of this type may be declared with
    pub fn accepts_scope(self, scope: Scope) -> bool {
        match self {
            Self::MoraleChange | Self::SupplyChange | Self::StrengthBoost => {
                matches!(scope, Scope::SingleBrigade | Scope::AllBrigades)
            }
            Self::FullRecovery | Self::AntiArmorBoost | Self::CombatBuff => scope == Scope::SingleBrigade,
            Self::CombatDebuff
            | Self::EwIntensify
            | Self::EnemyWeakening
            | Self::EnemySupplyDisrupt
            | Self::ArtillerySuccess
            | Self::IntelBonus
            | Self::WeatherIntensify => scope == Scope::Region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub trigger: Trigger,
    pub probability: f64,
    pub scope: Scope,
    pub effect: EffectType,
    #[serde(default)]
    pub value: i32,
}

/// Which way an event leans relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSide {
    Friendly,
    Enemy,
    Neutral,
}

impl EventSide {
    /// Log prefix for a fired event
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Enemy => "[ENEMY]",
            Self::Friendly | Self::Neutral => "[EVENT]",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCatalog {
    #[serde(default)]
    pub ukraine: Vec<EventDef>,
    #[serde(default)]
    pub russia: Vec<EventDef>,
    #[serde(default)]
    pub neutral: Vec<EventDef>,
}

impl EventCatalog {
    /// The catalog shipped with the game
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_EVENTS_TOML)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let catalog: EventCatalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = AHashSet::new();
        for event in self.ukraine.iter().chain(&self.russia).chain(&self.neutral) {
            if !seen.insert(event.id.as_str()) {
                return Err(FrontlineError::Config(format!("duplicate event id {}", event.id)));
            }
            if !(0.0..=1.0).contains(&event.probability) {
                return Err(FrontlineError::Config(format!(
                    "event {} probability {} outside [0, 1]",
                    event.id, event.probability
                )));
            }
            if !event.effect.accepts_scope(event.scope) {
                return Err(FrontlineError::Config(format!(
                    "event {} cannot apply {:?} with scope {:?}",
                    event.id, event.effect, event.scope
                )));
            }
        }
        Ok(())
    }

    /// Events that favour `faction`
    pub fn pool(&self, faction: Faction) -> &[EventDef] {
        match faction {
            Faction::Ukraine => &self.ukraine,
            Faction::Russia => &self.russia,
        }
    }

    /// Pools in resolution order (friendly, enemy, neutral) for `player`
    pub fn pools_for(&self, player: Faction) -> [(EventSide, &[EventDef]); 3] {
        [
            (EventSide::Friendly, self.pool(player)),
            (EventSide::Enemy, self.pool(player.opponent())),
            (EventSide::Neutral, self.neutral.as_slice()),
        ]
    }

    pub fn len(&self) -> usize {
        self.ukraine.len() + self.russia.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = EventCatalog::builtin().unwrap();
        assert!(!catalog.ukraine.is_empty());
        assert!(!catalog.russia.is_empty());
        assert!(!catalog.neutral.is_empty());
    }

    #[test]
    fn test_pools_follow_player() {
        let catalog = EventCatalog::builtin().unwrap();
        let pools = catalog.pools_for(Faction::Russia);
        assert_eq!(pools[0].0, EventSide::Friendly);
        assert_eq!(pools[0].1, catalog.russia.as_slice());
        assert_eq!(pools[1].1, catalog.ukraine.as_slice());
        assert_eq!(pools[2].0, EventSide::Neutral);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let toml = r#"
[[neutral]]
id = "x"
name = "X"
description = "x"
trigger = "turn_start"
probability = 1.5
scope = "all_brigades"
effect = "morale_change"
value = 1
"#;
        assert!(matches!(EventCatalog::from_toml_str(toml), Err(FrontlineError::Config(_))));
    }

    #[test]
    fn test_rejects_mismatched_scope() {
        let toml = r#"
[[ukraine]]
id = "x"
name = "X"
description = "x"
trigger = "turn_end"
probability = 0.5
scope = "all_brigades"
effect = "enemy_weakening"
value = -5
"#;
        assert!(EventCatalog::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(EventSide::Friendly.prefix(), "[EVENT]");
        assert_eq!(EventSide::Neutral.prefix(), "[EVENT]");
        assert_eq!(EventSide::Enemy.prefix(), "[ENEMY]");
    }
}
