//! Translates agent actions into scheduled book operations.

use rand_distr::{Distribution, Exp};

use crate::config::SimConfig;
use crate::orderbook::{BookSnapshot, Order, OrderBook, Price, Qty, Side, Time};

/// What an agent observes when asked for its next action.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Average of `best_bid`/`best_ask`, when both exist.
    pub mid: Option<f64>,
    pub l2: BookSnapshot,
}

impl MarketState {
    fn from_book(book: &OrderBook) -> Self {
        let snapshot = book.current_snapshot();
        let best_bid = snapshot.best_bid();
        let best_ask = snapshot.best_ask();
        let mid = snapshot.mid();
        MarketState {
            best_bid,
            best_ask,
            mid,
            l2: snapshot,
        }
    }
}

/// An order-level decision produced by an agent.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rest a limit order, quantized by the environment before submission.
    PlaceLimit { side: Side, price: f64, qty: Qty },
    /// Submit a market order, quantized by the environment before submission.
    PlaceMarket { side: Side, qty: Qty },
    /// Cancel a resting order, applied synchronously.
    Cancel { order_id: String },
}

/// Either an event the engine should schedule, or nothing (for a
/// synchronous cancel, which is applied immediately and schedules no
/// further event).
pub enum Scheduled {
    OrderSubmission { time: Time, order: Order },
    None,
}

/// Quantizes prices/quantities and turns [`Action`]s into book operations
/// or scheduled submission events.
#[derive(Debug, Clone)]
pub struct Environment {
    config: SimConfig,
}

impl Environment {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The market state an agent observes at `book`'s current state.
    pub fn get_market_state(&self, book: &OrderBook) -> MarketState {
        MarketState::from_book(book)
    }

    /// Quantizes `price` to the tick grid. Buys round down, sells round
    /// up, so a quantized order can never become more aggressive than the
    /// agent intended.
    pub fn quantize_price(&self, side: Side, price: f64) -> Price {
        let tick = self.config.tick_size as f64;
        match side {
            Side::Buy => (price / tick).floor() as Price * self.config.tick_size,
            Side::Sell => (price / tick).ceil() as Price * self.config.tick_size,
        }
    }

    /// Clamps `qty` up to at least `lot_size`.
    pub fn quantize_qty(&self, qty: Qty) -> Qty {
        qty.max(self.config.lot_size)
    }

    /// Applies one action: cancels are resolved against `book` immediately
    /// and return [`Scheduled::None`]; places are quantized and returned
    /// as a submission to schedule at `current_time + Exp(1/mean_latency)`.
    ///
    /// The caller (the engine) is responsible for bookkeeping that spans
    /// both the action and the agent — recording `active_orders` for
    /// limit placements and removing cancelled ids — since only it holds
    /// a mutable reference to the agent.
    pub fn apply_action(
        &self,
        book: &mut OrderBook,
        agent_id: &str,
        action: Action,
        current_time: Time,
        latency_rng: &mut impl rand::Rng,
    ) -> Scheduled {
        match action {
            Action::Cancel { order_id } => {
                book.cancel(&order_id);
                Scheduled::None
            }
            Action::PlaceLimit { side, price, qty } => {
                let price = self.quantize_price(side, price);
                let qty = self.quantize_qty(qty);
                let order_id = format!("{agent_id}-{current_time}-{}", book.reserve_sequence());
                let order = Order {
                    order_id,
                    side,
                    price: Some(price),
                    qty,
                    timestamp: current_time,
                };
                self.schedule_submission(order, current_time, latency_rng)
            }
            Action::PlaceMarket { side, qty } => {
                let qty = self.quantize_qty(qty);
                let order_id = format!("{agent_id}-{current_time}-{}", book.reserve_sequence());
                let order = Order {
                    order_id,
                    side,
                    price: None,
                    qty,
                    timestamp: current_time,
                };
                self.schedule_submission(order, current_time, latency_rng)
            }
        }
    }

    fn schedule_submission(
        &self,
        order: Order,
        current_time: Time,
        latency_rng: &mut impl rand::Rng,
    ) -> Scheduled {
        let latency: f64 = Exp::new(1.0 / self.config.mean_latency)
            .expect("mean_latency validated positive at config construction")
            .sample(latency_rng);
        Scheduled::OrderSubmission {
            time: current_time + latency,
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn buy_price_rounds_down_sell_rounds_up() {
        let env = Environment::new(SimConfig {
            tick_size: 5,
            ..SimConfig::default()
        });
        assert_eq!(env.quantize_price(Side::Buy, 23.0), 20);
        assert_eq!(env.quantize_price(Side::Sell, 23.0), 25);
    }

    #[test]
    fn qty_is_clamped_to_lot_size() {
        let env = Environment::new(SimConfig {
            lot_size: 10,
            ..SimConfig::default()
        });
        assert_eq!(env.quantize_qty(3), 10);
        assert_eq!(env.quantize_qty(50), 50);
    }

    #[test]
    fn market_state_with_empty_book_has_no_mid() {
        let env = Environment::new(SimConfig::default());
        let book = OrderBook::new();
        let state = env.get_market_state(&book);
        assert_eq!(state.mid, None);
    }

    #[test]
    fn cancel_action_is_synchronous_and_unscheduled() {
        let env = Environment::new(SimConfig::default());
        let mut book = OrderBook::new();
        book.submit_limit("A-1", Side::Buy, 100, 5, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scheduled = env.apply_action(
            &mut book,
            "A",
            Action::Cancel {
                order_id: "A-1".into(),
            },
            2.0,
            &mut rng,
        );
        assert!(matches!(scheduled, Scheduled::None));
        assert_eq!(book.current_snapshot().best_bid(), None);
    }

    #[test]
    fn place_limit_action_schedules_a_future_submission() {
        let env = Environment::new(SimConfig::default());
        let mut book = OrderBook::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scheduled = env.apply_action(
            &mut book,
            "A",
            Action::PlaceLimit {
                side: Side::Buy,
                price: 100.0,
                qty: 5,
            },
            1.0,
            &mut rng,
        );
        match scheduled {
            Scheduled::OrderSubmission { time, order } => {
                assert!(time > 1.0);
                assert_eq!(order.price, Some(100));
            }
            Scheduled::None => panic!("expected a scheduled submission"),
        }
    }
}
