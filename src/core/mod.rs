pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{Difficulty, DifficultyLevel, EngineConfig};
pub use error::{FrontlineError, Result};
pub use rng::{RandomSource, ScriptedRandom};
pub use types::{clamp_stat, BrigadeId, Control, Faction, RegionId, STAT_MAX, STAT_MIN};
