use thiserror::Error;

use crate::core::types::{BrigadeId, RegionId};

#[derive(Error, Debug)]
pub enum FrontlineError {
    #[error("Brigade not found: {0}")]
    BrigadeNotFound(BrigadeId),

    #[error("Region not found: {0}")]
    RegionNotFound(RegionId),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("No pending order at index {0}")]
    OrderNotFound(usize),

    #[error("Campaign is over; no further turns can be resolved")]
    GameOver,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FrontlineError>;
