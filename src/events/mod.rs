//! Random events
//!
//! Events are data (`data/events.toml`) grouped into a pool per faction plus
//! a neutral pool. Which pool is "friendly" depends on the player's side.

pub mod apply;
pub mod catalog;

pub use apply::{apply_event_effect, trigger_random_events, EventReport};
pub use catalog::{EffectType, EventCatalog, EventDef, EventSide, Scope, Trigger};
