//! Turn resolution pipeline
//!
//! One call resolves a whole turn: weather, player orders, supply, turn-start
//! events, AI, defensive battles, turn-end events, drones, victory. Stages run
//! strictly in that order against a private working copy; the input state is
//! never touched and the new state only exists once every stage has run.

use tracing::{debug, info, warn};

use crate::ai::{apply_ai_action, compute_ai_actions, AiActionKind};
use crate::campaign::brigade::{Brigade, Stance};
use crate::campaign::order::Order;
use crate::campaign::region::Region;
use crate::campaign::state::GameState;
use crate::campaign::supply::{
    apply_supply_to_morale, consume_supplies_for_combat, consume_supplies_for_movement, update_supply,
};
use crate::campaign::weather::{roll_weather, Weather};
use crate::combat::{resolve_combat, resolve_defensive_battle};
use crate::core::config::EngineConfig;
use crate::core::rng::RandomSource;
use crate::core::types::{BrigadeId, RegionId};
use crate::events::{trigger_random_events, EventCatalog, Trigger};
use crate::turn::victory::{evaluate_victory, CampaignOutcome};

/// Result of resolving one turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The state after the turn, already advanced
    pub state: GameState,
    /// This turn's log lines, also appended to `state.event_log`
    pub log: Vec<String>,
    pub outcome: CampaignOutcome,
}

/// Mutable copies every stage works on
struct Working<'a> {
    brigades: Vec<Brigade>,
    regions: Vec<Region>,
    weather: Weather,
    log: Vec<String>,
    state: &'a GameState,
    config: &'a EngineConfig,
}

impl Working<'_> {
    fn brigade_index(&self, id: &BrigadeId) -> Option<usize> {
        self.brigades.iter().position(|b| &b.id == id)
    }

    fn region_index(&self, id: &RegionId) -> Option<usize> {
        self.regions.iter().position(|r| &r.id == id)
    }

    /// Look up both ends of an order, warning on a dangling reference
    fn order_targets(&self, brigade: &BrigadeId, target: &RegionId) -> Option<(usize, usize)> {
        let Some(b) = self.brigade_index(brigade) else {
            warn!(brigade = %brigade, "order references unknown brigade, skipped");
            return None;
        };
        let Some(r) = self.region_index(target) else {
            warn!(region = %target, "order references unknown region, skipped");
            return None;
        };
        Some((b, r))
    }

    fn execute_order<R: RandomSource + ?Sized>(&mut self, order: &Order, rng: &mut R) {
        match order {
            Order::Move { brigade, target } => {
                let Some((b, r)) = self.order_targets(brigade, target) else {
                    return;
                };
                let cost = self.config.movement_supply_cost;
                let mut moved = consume_supplies_for_movement(&self.brigades[b], cost);
                moved.location = target.clone();
                self.log.push(format!(
                    "[PLAYER] {} moves to {}. (-{} supplies, repositioned)",
                    moved.name, self.regions[r].name, cost
                ));
                self.brigades[b] = moved;
            }
            Order::StanceChange { brigade, stance } => {
                let Some(b) = self.brigade_index(brigade) else {
                    warn!(brigade = %brigade, "stance order references unknown brigade, skipped");
                    return;
                };
                self.brigades[b].stance = *stance;
                self.log.push(format!(
                    "[PLAYER] {} changes stance to {}. ({})",
                    self.brigades[b].name,
                    stance,
                    stance.impact_summary()
                ));
            }
            Order::Attack { brigade, target } => {
                let Some((b, r)) = self.order_targets(brigade, target) else {
                    return;
                };
                let cost = self.config.combat_supply_cost;
                let attacker = consume_supplies_for_combat(&self.brigades[b], cost);
                self.log.push(format!(
                    "[PLAYER] {} attacks {}. (-{} supplies, combat initiated)",
                    attacker.name, self.regions[r].name, cost
                ));
                let result = resolve_combat(
                    &attacker,
                    &self.regions[r],
                    self.weather,
                    self.state.player_faction,
                    rng,
                    self.config,
                );
                debug!(brigade = %attacker.id, region = %target, outcome = %result.outcome, "player attack resolved");
                self.brigades[b] = result.brigade;
                self.regions[r] = result.region;
                self.log.extend(result.messages);
            }
            Order::Reinforce { brigade, target } => {
                let Some((b, r)) = self.order_targets(brigade, target) else {
                    return;
                };
                if !self.regions[r].is_held_by(self.state.player_faction) {
                    warn!(brigade = %brigade, region = %target, "reinforce target not held by player, skipped");
                    return;
                }
                let cost = self.config.movement_supply_cost;
                let mut moved = consume_supplies_for_movement(&self.brigades[b], cost);
                moved.location = target.clone();
                moved.stance = Stance::Hold;
                self.log.push(format!(
                    "[PLAYER] {} reinforces {}. (-{} supplies, digging in)",
                    moved.name, self.regions[r].name, cost
                ));
                self.brigades[b] = moved;
            }
        }
    }

    fn update_supply_and_morale(&mut self) {
        let player = self.state.player_faction;
        let modifier = self.state.difficulty.player_supply_modifier;
        let regions = &self.regions;
        let weather = self.weather;
        self.brigades = self
            .brigades
            .iter()
            .map(|b| {
                let mut updated = update_supply(b, regions, weather, player, modifier);
                updated.morale = apply_supply_to_morale(updated.morale, updated.supply);
                updated
            })
            .collect();
    }

    fn roll_events<R: RandomSource + ?Sized>(&mut self, trigger: Trigger, catalog: &EventCatalog, rng: &mut R) {
        let chance = self.config.base_event_chance * self.state.difficulty.event_frequency_modifier;
        if !rng.chance(chance) {
            return;
        }
        let report = trigger_random_events(
            trigger,
            &mut self.brigades,
            &mut self.regions,
            self.state.player_faction,
            catalog,
            rng,
        );
        debug!(?trigger, fired = report.fired.len(), "event check");
        self.log.extend(report.messages);
    }

    fn run_ai<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let player = self.state.player_faction;
        let decisions = compute_ai_actions(
            &self.regions,
            &self.brigades,
            self.weather,
            &self.state.difficulty,
            player,
            rng,
        );
        self.log.extend(decisions.messages);

        for action in &decisions.actions {
            let messages = apply_ai_action(action, &mut self.regions, &mut self.brigades, player.opponent(), rng);
            self.log.extend(messages);
        }

        for action in decisions.actions.iter().filter(|a| a.kind == AiActionKind::Attack) {
            if let Some(target) = &action.target {
                self.defend_region(target, rng);
            }
        }
    }

    /// Every brigade standing in `target` fights off the assault
    fn defend_region<R: RandomSource + ?Sized>(&mut self, target: &RegionId, rng: &mut R) {
        let defenders: Vec<usize> = self
            .brigades
            .iter()
            .enumerate()
            .filter(|(_, b)| &b.location == target)
            .map(|(i, _)| i)
            .collect();

        for b in defenders {
            let Some(r) = self.region_index(target) else {
                warn!(region = %target, "attacked region not on map, no defensive battle");
                return;
            };
            let result = resolve_defensive_battle(&self.brigades[b], &self.regions[r], self.weather, rng, self.config);
            debug!(brigade = %result.brigade.id, region = %target, outcome = %result.outcome, "defensive battle resolved");
            self.brigades[b] = result.brigade;
            self.regions[r] = result.region;
            self.log.extend(result.messages);
        }
    }

    fn regenerate_drones(&mut self) -> u32 {
        let cap = self.config.drone_cap;
        let regen = self.state.difficulty.player_drone_regen;
        for brigade in &mut self.brigades {
            brigade.drone_count = brigade.drone_count.saturating_add(regen).min(cap);
        }
        self.state
            .enemy_drones
            .saturating_add(self.state.difficulty.enemy_drone_regen)
            .min(cap)
    }
}

/// Resolve the turn described by `state` and its queued orders
///
/// Never fails: orders that reference missing brigades or regions are skipped
/// with a warning. All randomness is drawn from `rng`, so a seeded source
/// reproduces the turn exactly.
pub fn resolve_turn<R: RandomSource + ?Sized>(
    state: &GameState,
    config: &EngineConfig,
    catalog: &EventCatalog,
    rng: &mut R,
) -> TurnOutcome {
    if state.game_over {
        warn!(turn = state.turn, "resolving a turn on a finished campaign");
    }

    let mut work = Working {
        brigades: state.brigades.clone(),
        regions: state.regions.clone(),
        weather: state.weather,
        log: vec![format!("=== Turn {} Resolution ===", state.turn)],
        state,
        config,
    };

    work.weather = roll_weather(rng);
    work.log.push(format!("Weather: {}", work.weather.label()));

    for order in &state.orders {
        work.execute_order(order, rng);
    }

    work.update_supply_and_morale();
    work.roll_events(Trigger::TurnStart, catalog, rng);
    work.run_ai(rng);
    work.roll_events(Trigger::TurnEnd, catalog, rng);
    let enemy_drones = work.regenerate_drones();

    let Working {
        brigades,
        regions,
        weather,
        mut log,
        ..
    } = work;

    let mut next = GameState {
        brigades,
        regions,
        weather,
        enemy_drones,
        ..state.clone()
    };

    let outcome = evaluate_victory(&next);
    if let Some(banner) = outcome.banner() {
        info!(turn = state.turn, victory = outcome.is_victory(), "campaign over");
        log.push(banner);
        next.game_over = true;
        next.victory = outcome.is_victory();
    }

    next.turn = state.turn + 1;
    next.orders.clear();
    next.event_log.extend(log.iter().cloned());

    info!(
        turn = state.turn,
        weather = %weather,
        strength = next.total_strength(),
        held = next.player_held_count(),
        "turn resolved"
    );

    TurnOutcome {
        state: next,
        log,
        outcome,
    }
}
