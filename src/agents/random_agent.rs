//! Uninformed baseline trader: half market orders, half near-mid limits.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::environment::{Action, MarketState};
use crate::orderbook::{Qty, Side, Trade};

/// Picks a uniform random side each arrival, then flips a coin between a
/// market order and a limit order resting near the current mid (or a
/// configured fallback price when the book has no mid yet).
#[derive(Debug, Clone)]
pub struct RandomAgent {
    id: String,
    arrival_rate: f64,
    qty: Qty,
    fallback_price: f64,
}

impl RandomAgent {
    pub fn new(id: impl Into<String>, arrival_rate: f64, qty: Qty, fallback_price: f64) -> Self {
        Self {
            id: id.into(),
            arrival_rate,
            qty,
            fallback_price,
        }
    }
}

impl Agent for RandomAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    fn get_action(&mut self, state: &MarketState, rng: &mut ChaCha8Rng) -> Vec<Action> {
        let side = if rng.random_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };
        if rng.random_bool(0.5) {
            vec![Action::PlaceMarket {
                side,
                qty: self.qty,
            }]
        } else {
            let mid = state.mid.unwrap_or(self.fallback_price);
            vec![Action::PlaceLimit {
                side,
                price: mid,
                qty: self.qty,
            }]
        }
    }

    fn on_trade(&mut self, _trade: &Trade, _my_side: Side) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderBook;
    use rand::SeedableRng;

    #[test]
    fn always_returns_exactly_one_action() {
        let mut agent = RandomAgent::new("R", 1.0, 5, 100.0);
        let book = OrderBook::new();
        let state = MarketState {
            best_bid: None,
            best_ask: None,
            mid: None,
            l2: book.current_snapshot(),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(agent.get_action(&state, &mut rng).len(), 1);
        }
    }
}
