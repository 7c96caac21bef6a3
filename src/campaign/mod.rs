//! Operational layer: brigades, the region map, orders, weather and supply

pub mod brigade;
pub mod order;
pub mod region;
pub mod scenario;
pub mod state;
pub mod supply;
pub mod weather;

pub use brigade::{Brigade, Stance, UnitType};
pub use order::Order;
pub use region::{find_region, find_region_mut, neighbors_of, Region, Terrain};
pub use scenario::Scenario;
pub use state::{GameState, VictoryConditions};
pub use weather::{roll_weather, Weather};
