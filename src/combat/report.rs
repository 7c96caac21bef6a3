//! Turn-log markers consumed by the presentation layer
//!
//! Markers are `[TAG]field|field|...[/TAG]` lines embedded in the turn log.
//! Field order is fixed; combat results always list the player's brigade
//! first.

use crate::campaign::brigade::Brigade;
use crate::campaign::region::Region;
use crate::combat::dice::{format_dice, DiceOutcome};

pub const COMBAT_START: &str = "COMBAT_START";
pub const ATTACKER_BRIGADE: &str = "ATTACKER_BRIGADE";
pub const DEFENDER_INFO: &str = "DEFENDER_INFO";
pub const COMBAT_RESULTS: &str = "COMBAT_RESULTS";
pub const COMBAT_END: &str = "COMBAT_END";

fn marker(tag: &str, fields: &[String]) -> String {
    format!("[{tag}]{}[/{tag}]", fields.join("|"))
}

pub fn combat_start(attacker: &str, defender: &str) -> String {
    marker(COMBAT_START, &[attacker.to_string(), defender.to_string()])
}

pub fn attacker_brigade(brigade: &Brigade) -> String {
    marker(
        ATTACKER_BRIGADE,
        &[
            brigade.name.clone(),
            brigade.unit_type.to_string(),
            brigade.strength.to_string(),
            brigade.morale.to_string(),
        ],
    )
}

pub fn defender_info(region: &Region) -> String {
    marker(
        DEFENDER_INFO,
        &[
            region.name.clone(),
            region.enemy_strength_estimate.to_string(),
            region.terrain.to_string(),
        ],
    )
}

/// Casualty summary; `brigade` is always the player's unit
pub fn combat_results(brigade: &str, brigade_losses: i32, morale_change: i32, enemy: &str, enemy_losses: i32) -> String {
    marker(
        COMBAT_RESULTS,
        &[
            brigade.to_string(),
            brigade_losses.to_string(),
            morale_change.to_string(),
            enemy.to_string(),
            enemy_losses.to_string(),
        ],
    )
}

pub fn combat_end(label: &str) -> String {
    marker(COMBAT_END, &[label.to_string()])
}

pub fn dice_roll_line(side: &str, dice: &[u8]) -> String {
    format!("{side} rolls {} dice: {}", dice.len(), format_dice(dice))
}

/// Per-die narration plus the tally line
pub fn comparison_lines(outcome: &DiceOutcome) -> Vec<String> {
    let mut lines: Vec<String> = outcome
        .comparisons
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let winner = if c.attacker_won { "Attacker" } else { "Defender" };
            format!("  Roll {}: {} vs {} -> {} wins", i + 1, c.attacker, c.defender, winner)
        })
        .collect();
    lines.push(format!(
        "Dice result: Attacker {} wins, Defender {} wins",
        outcome.attacker_wins, outcome.defender_wins
    ));
    lines
}

/// `+5` / `-3` / `0`
pub fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Extract the fields of a marker line, if `line` carries `tag`
pub fn parse_marker<'a>(line: &'a str, tag: &str) -> Option<Vec<&'a str>> {
    let open = format!("[{tag}]");
    let close = format!("[/{tag}]");
    let start = line.find(&open)? + open.len();
    let end = line[start..].find(&close)? + start;
    Some(line[start..end].split('|').collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::brigade::UnitType;
    use crate::campaign::region::Terrain;
    use crate::combat::dice::compare_dice;
    use crate::core::types::Control;

    #[test]
    fn test_marker_shapes() {
        let brigade = Brigade::new("b", "93rd Mechanized", UnitType::Mechanized, "kyiv").with_stats(85, 90, 80, 70);
        let region = Region::new("r", "Kyiv Northwest", Control::Contested, Terrain::RiverCrossing).with_enemy_strength(45);

        assert_eq!(combat_start("A", "B"), "[COMBAT_START]A|B[/COMBAT_START]");
        assert_eq!(
            attacker_brigade(&brigade),
            "[ATTACKER_BRIGADE]93rd Mechanized|mechanized|85|90[/ATTACKER_BRIGADE]"
        );
        assert_eq!(
            defender_info(&region),
            "[DEFENDER_INFO]Kyiv Northwest|45|river crossing[/DEFENDER_INFO]"
        );
        assert_eq!(combat_end("STALEMATE"), "[COMBAT_END]STALEMATE[/COMBAT_END]");
    }

    #[test]
    fn test_parse_marker_roundtrip() {
        let line = combat_results("Alpha", 12, -5, "Sumy", 30);
        assert_eq!(parse_marker(&line, COMBAT_RESULTS), Some(vec!["Alpha", "12", "-5", "Sumy", "30"]));
        assert_eq!(parse_marker(&line, COMBAT_END), None);
    }

    #[test]
    fn test_comparison_lines() {
        let lines = comparison_lines(&compare_dice(&[5, 4, 3], &[3, 2]));
        assert_eq!(lines[0], "  Roll 1: 5 vs 3 -> Attacker wins");
        assert_eq!(lines.last().map(String::as_str), Some("Dice result: Attacker 2 wins, Defender 0 wins"));
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(5), "+5");
        assert_eq!(signed(0), "0");
        assert_eq!(signed(-8), "-8");
    }
}
