//! A deterministic discrete-event simulator for an agent-based limit
//! order book.
//!
//! Three subsystems compose the core:
//!
//! - [`orderbook`] — a price-time-priority matching engine: limit and
//!   market orders, cancellation, aggregated depth snapshots, and an
//!   append-only trade log.
//! - [`engine`] — a single-threaded, time-ordered event scheduler that
//!   drives agent arrivals, order submissions, periodic snapshots, and
//!   fair-value updates, with stable `(time, sequence)` tie-breaking so a
//!   run is fully reproducible from a fixed seed.
//! - [`environment`] and [`agents`] — the action pipeline: agents observe
//!   [`environment::MarketState`] and return [`environment::Action`]s,
//!   which the environment quantizes and schedules with latency before
//!   they reach the book.
//!
//! [`fair_value`] supplies the shared random-walk process agents read,
//! [`logger`] records everything the engine produces, and [`config`]
//! holds the layered configuration that ties the pieces together.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use lob_sim::agents::{Agent, RandomAgent};
//! use lob_sim::config::SimConfig;
//! use lob_sim::engine::Engine;
//! use lob_sim::fair_value::FairValue;
//! use lob_sim::logger::InMemoryLogger;
//!
//! let config = SimConfig {
//!     horizon: 50.0,
//!     seed: 7,
//!     ..SimConfig::default()
//! };
//! let fair_value = Rc::new(RefCell::new(FairValue::new(
//!     config.fair_value_initial,
//!     config.fair_value_sigma,
//! )));
//! let agents: Vec<Box<dyn Agent>> = vec![Box::new(RandomAgent::new("trader", 2.0, 5, 100.0))];
//! let mut engine = Engine::new(config, fair_value, agents, Box::new(InMemoryLogger::new()));
//! engine.run();
//! ```

pub mod agents;
pub mod config;
pub mod engine;
pub mod environment;
pub mod fair_value;
pub mod logger;
pub mod orderbook;
pub mod prelude;
