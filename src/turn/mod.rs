//! Turn resolution

pub mod pipeline;
pub mod victory;

pub use pipeline::{resolve_turn, TurnOutcome};
pub use victory::{evaluate_victory, CampaignOutcome};
