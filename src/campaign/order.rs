//! Player orders queued for the next turn resolution

use serde::{Deserialize, Serialize};

use crate::campaign::brigade::Stance;
use crate::core::types::{BrigadeId, RegionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Order {
    /// Relocate a brigade
    Move { brigade: BrigadeId, target: RegionId },
    /// Attack a region with a brigade
    Attack { brigade: BrigadeId, target: RegionId },
    /// Change a brigade's posture
    StanceChange { brigade: BrigadeId, stance: Stance },
    /// Redeploy a brigade into a friendly region and dig in
    Reinforce { brigade: BrigadeId, target: RegionId },
}

impl Order {
    pub fn move_to(brigade: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Move {
            brigade: BrigadeId::new(brigade),
            target: RegionId::new(target),
        }
    }

    pub fn attack(brigade: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Attack {
            brigade: BrigadeId::new(brigade),
            target: RegionId::new(target),
        }
    }

    pub fn stance(brigade: impl Into<String>, stance: Stance) -> Self {
        Self::StanceChange {
            brigade: BrigadeId::new(brigade),
            stance,
        }
    }

    pub fn reinforce(brigade: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Reinforce {
            brigade: BrigadeId::new(brigade),
            target: RegionId::new(target),
        }
    }

    pub fn brigade(&self) -> &BrigadeId {
        match self {
            Self::Move { brigade, .. }
            | Self::Attack { brigade, .. }
            | Self::StanceChange { brigade, .. }
            | Self::Reinforce { brigade, .. } => brigade,
        }
    }

    pub fn target(&self) -> Option<&RegionId> {
        match self {
            Self::Move { target, .. } | Self::Attack { target, .. } | Self::Reinforce { target, .. } => Some(target),
            Self::StanceChange { .. } => None,
        }
    }
}
