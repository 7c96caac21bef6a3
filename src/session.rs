//! Campaign service and persistence
//!
//! `Campaign` owns the state between turns: it validates and queues player
//! orders, drives the turn pipeline with its own seeded generator and refuses
//! to resolve turns once the campaign is over. State is saved as JSON through
//! a `StateStore`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};

use crate::campaign::brigade::Brigade;
use crate::campaign::order::Order;
use crate::campaign::scenario::Scenario;
use crate::campaign::state::GameState;
use crate::core::config::{Difficulty, EngineConfig};
use crate::core::error::{FrontlineError, Result};
use crate::core::types::RegionId;
use crate::events::EventCatalog;
use crate::turn::{resolve_turn, TurnOutcome};

/// Somewhere a campaign can be saved to and resumed from
pub trait StateStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<GameState>>;
    fn save(&self, state: &GameState) -> Result<()>;
}

/// Pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<GameState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&contents)?;
        Ok(Some(state))
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), turn = state.turn, "campaign saved");
        Ok(())
    }
}

pub struct Campaign {
    state: GameState,
    config: EngineConfig,
    catalog: EventCatalog,
    rng: ChaCha8Rng,
}

impl Campaign {
    /// Start `scenario` with the built-in events and default engine constants
    pub fn new_game(scenario: &Scenario, difficulty: Difficulty, seed: u64) -> Result<Self> {
        Self::new_game_with(scenario, difficulty, EngineConfig::default(), EventCatalog::builtin()?, seed)
    }

    pub fn new_game_with(
        scenario: &Scenario,
        difficulty: Difficulty,
        config: EngineConfig,
        catalog: EventCatalog,
        seed: u64,
    ) -> Result<Self> {
        difficulty.validate()?;
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = scenario.new_game(difficulty, &mut rng);
        Ok(Self {
            state,
            config,
            catalog,
            rng,
        })
    }

    /// Resume from a saved state
    pub fn from_state(state: GameState, seed: u64) -> Result<Self> {
        Self::from_state_with(state, EngineConfig::default(), EventCatalog::builtin()?, seed)
    }

    pub fn from_state_with(state: GameState, config: EngineConfig, catalog: EventCatalog, seed: u64) -> Result<Self> {
        config.validate()?;
        state.difficulty.validate()?;
        Ok(Self {
            state,
            config,
            catalog,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Resume whatever `store` holds
    pub fn resume(store: &impl StateStore, seed: u64) -> Result<Option<Self>> {
        store.load()?.map(|state| Self::from_state(state, seed)).transpose()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn pending_orders(&self) -> &[Order] {
        &self.state.orders
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Validate `order` against the current map and queue it
    ///
    /// Returns the order's index in the queue.
    pub fn issue_order(&mut self, order: Order) -> Result<usize> {
        self.validate_order(&order)?;
        tracing::debug!(?order, "order queued");
        self.state.orders.push(order);
        Ok(self.state.orders.len() - 1)
    }

    fn validate_order(&self, order: &Order) -> Result<()> {
        if self.state.game_over {
            return Err(FrontlineError::GameOver);
        }

        let brigade = self
            .state
            .brigade(order.brigade())
            .ok_or_else(|| FrontlineError::BrigadeNotFound(order.brigade().clone()))?;
        if !brigade.is_operational() {
            return Err(FrontlineError::InvalidOrder(format!("{} has been destroyed", brigade.name)));
        }

        let Some(target_id) = order.target() else {
            return Ok(());
        };
        let target = self
            .state
            .region(target_id)
            .ok_or_else(|| FrontlineError::RegionNotFound(target_id.clone()))?;
        let from = self.projected_location(brigade);
        let location = self
            .state
            .region(from)
            .ok_or_else(|| FrontlineError::RegionNotFound(from.clone()))?;

        if !location.is_adjacent_to(target_id) {
            return Err(FrontlineError::InvalidOrder(format!(
                "{} is not adjacent to {}",
                target.name, location.name
            )));
        }

        let player = self.state.player_faction;
        match order {
            Order::Attack { .. } if target.is_held_by(player) => Err(FrontlineError::InvalidOrder(format!(
                "{} is already held by {}",
                target.name, player
            ))),
            Order::Reinforce { .. } if !target.is_held_by(player) => Err(FrontlineError::InvalidOrder(format!(
                "{} is not held by {}",
                target.name, player
            ))),
            _ => Ok(()),
        }
    }

    /// Where `brigade` will stand once its queued moves have resolved
    fn projected_location<'a>(&'a self, brigade: &'a Brigade) -> &'a RegionId {
        self.state
            .orders
            .iter()
            .rev()
            .filter(|o| o.brigade() == &brigade.id)
            .find_map(|o| match o {
                Order::Move { target, .. } | Order::Reinforce { target, .. } => Some(target),
                _ => None,
            })
            .unwrap_or(&brigade.location)
    }

    pub fn cancel_order(&mut self, index: usize) -> Result<Order> {
        if index >= self.state.orders.len() {
            return Err(FrontlineError::OrderNotFound(index));
        }
        Ok(self.state.orders.remove(index))
    }

    pub fn clear_orders(&mut self) {
        self.state.orders.clear();
    }

    /// Resolve the queued orders and advance to the next turn
    pub fn end_turn(&mut self) -> Result<TurnOutcome> {
        if self.state.game_over {
            return Err(FrontlineError::GameOver);
        }
        let outcome = resolve_turn(&self.state, &self.config, &self.catalog, &mut self.rng);
        self.state = outcome.state.clone();
        Ok(outcome)
    }

    pub fn save(&self, store: &impl StateStore) -> Result<()> {
        store.save(&self.state)
    }
}
