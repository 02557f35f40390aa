//! Order primitives shared by the book, the matching engine and the environment.

use std::fmt;

/// Simulation time, measured in the same unit the engine's event queue uses.
///
/// Not wall-clock time: it is advanced purely by event dispatch (see
/// [`crate::engine::Engine::run`]).
pub type Time = f64;

/// Price expressed as an integer multiple of the book's tick size.
///
/// Kept as an integer rather than a float so that price equality and
/// ordering inside the matching loop are exact.
pub type Price = i64;

/// Order / trade quantity. Always positive once it rests on the book.
pub type Qty = u64;

/// Which side of the book an order sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// A buy (bid) order.
    Buy,
    /// A sell (ask) order.
    Sell,
}

impl Side {
    /// The side an order on `self` would need to rest on to trade against it.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// An order as it is handed to [`crate::orderbook::OrderBook::submit`].
///
/// `price = None` means a market order: it never rests, and any quantity
/// left over once the opposite side is exhausted is implicitly cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Unique id for this submission, conventionally
    /// `"<agent_id>-<time>-<seq>"`. The trailing sequence number keeps
    /// two orders from the same agent's same arrival — which share
    /// `<time>` — from colliding.
    pub order_id: String,
    /// Buy or sell.
    pub side: Side,
    /// `None` for a market order.
    pub price: Option<Price>,
    /// Quantity requested. Must already be quantized to the book's lot size
    /// by the caller (see [`crate::environment::Environment::apply_action`]).
    pub qty: Qty,
    /// Arrival time on the book. Overwritten by `OrderBook::submit` with the
    /// time the caller passes in, which must be `engine.time` at dispatch.
    pub timestamp: Time,
}

impl Order {
    /// Splits `order_id` on the first `-` and returns the agent-id prefix.
    ///
    /// Agent ids must not themselves contain `-`; see
    /// [`crate::agents::Agent::id`].
    pub fn owning_agent_id(order_id: &str) -> &str {
        order_id.split('-').next().unwrap_or(order_id)
    }
}

/// A resting order kept inside a price-level queue on the book.
///
/// Distinct from [`Order`]: it always has a concrete price (market orders
/// never rest) and additionally carries the insertion sequence used to
/// break timestamp ties deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct RestingOrder {
    /// Unique order id.
    pub order_id: String,
    /// Buy or sell.
    pub side: Side,
    /// Resting limit price.
    pub price: Price,
    /// Remaining quantity; decremented in place as fills happen.
    pub qty: Qty,
    /// Arrival time on the book, used for time priority.
    pub timestamp: Time,
    /// Monotonically increasing insertion sequence, the tie-break of last
    /// resort when two orders share `(price, timestamp)`.
    pub seq: u64,
}
