//! Frontline - turn-resolution engine for an operational wargame
//!
//! Brigades, a region map, dice combat, supply, a region-level AI and random
//! events, resolved one turn at a time by `turn::resolve_turn`.

pub mod ai;
pub mod autoplay;
pub mod campaign;
pub mod combat;
pub mod core;
pub mod events;
pub mod session;
pub mod turn;
