//! Opposing-faction AI
//!
//! Region-level, stateless: each turn every AI-held region decides on its
//! own (`decision`) and the chosen actions are then applied in order
//! (`apply`). AI attacks additionally trigger dice-based defensive battles
//! for every brigade in the target region; the turn pipeline runs those.

pub mod apply;
pub mod decision;

pub use apply::apply_ai_action;
pub use decision::{
    choose_action, compute_ai_actions, region_weights, ActionWeights, AiAction, AiActionKind, AiDecisions,
};
