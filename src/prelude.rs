//! Re-exports of the types most call sites need.
//!
//! ```
//! use lob_sim::prelude::*;
//! ```

pub use crate::agents::{Agent, MarketMakerAgent, MomentumAgent, NoiseTraderAgent, RandomAgent};
pub use crate::config::{ConfigError, SimConfig};
pub use crate::engine::{Engine, Event};
pub use crate::environment::{Action, Environment, MarketState};
pub use crate::fair_value::FairValue;
pub use crate::logger::{InMemoryLogger, Logger};
pub use crate::orderbook::{
    BookSnapshot, Order, OrderBook, OrderBookError, Price, Qty, RestingOrder, Side, Time, Trade,
    vwap,
};
