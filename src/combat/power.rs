//! Combat power of a brigade before situational modifiers

use crate::campaign::brigade::Brigade;

/// `strength * morale factor * experience factor * type multiplier`
///
/// Morale scales power between 0.5x (broken) and 1.0x (full); experience adds
/// up to +50%.
pub fn brigade_power(brigade: &Brigade) -> f64 {
    let morale_factor = 0.5 + 0.5 * brigade.morale as f64 / 100.0;
    let experience_factor = 1.0 + brigade.experience as f64 / 200.0;
    brigade.strength as f64 * morale_factor * experience_factor * brigade.unit_type.power_multiplier()
}
