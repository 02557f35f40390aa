//! Trading agents: the capability set the engine drives them through.

mod market_maker;
mod momentum;
mod noise_trader;
mod random_agent;

pub use market_maker::MarketMakerAgent;
pub use momentum::MomentumAgent;
pub use noise_trader::NoiseTraderAgent;
pub use random_agent::RandomAgent;

use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use crate::environment::{Action, MarketState};
use crate::orderbook::{Qty, Side, Time, Trade};

/// The narrow surface the engine drives every agent through.
///
/// Agents own all of their own state (balance, inventory, active orders,
/// strategy internals); the engine only ever calls into them through
/// these three methods, never reaching into their fields directly.
pub trait Agent {
    /// Stable identifier, used as the prefix of every order id this agent
    /// submits. Must not contain `-`.
    fn id(&self) -> &str;

    /// Mean arrival rate `lambda` used by the default `next_event_time`.
    fn arrival_rate(&self) -> f64;

    /// When this agent's next `AgentArrivalEvent` should fire, given it is
    /// currently `current_time`. Defaults to `current_time + Exp(1/lambda)`.
    fn next_event_time(&self, current_time: Time, rng: &mut ChaCha8Rng) -> Time {
        let draw: f64 = Exp::new(1.0 / self.arrival_rate())
            .expect("arrival_rate validated positive at registration")
            .sample(rng);
        current_time + draw
    }

    /// Decides what to do given the current market state. An empty vec is
    /// a no-op arrival (the agent chose to do nothing this tick).
    fn get_action(&mut self, state: &MarketState, rng: &mut ChaCha8Rng) -> Vec<Action>;

    /// Invoked once per fill this agent is a counterparty to. `my_side` is
    /// this agent's side of the trade (not necessarily the maker side).
    fn on_trade(&mut self, trade: &Trade, my_side: Side);

    /// Current signed inventory, for periodic recording. Defaults to 0
    /// for agents that do not track one.
    fn inventory(&self) -> f64 {
        0.0
    }

    /// Called by the engine after a `PlaceLimit` action is scheduled, so
    /// the agent can track its own resting orders (e.g. to cancel them on
    /// a later arrival). Not called for market orders. Default is a
    /// no-op for agents that don't need this bookkeeping.
    fn record_active_order(&mut self, _order_id: String, _qty: Qty) {}

    /// Called by the engine when an order fills completely or is
    /// cancelled, mirroring [`Agent::record_active_order`].
    fn remove_active_order(&mut self, _order_id: &str) {}
}
