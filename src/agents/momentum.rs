//! SMA-crossover trend follower.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::environment::{Action, MarketState};
use crate::orderbook::{Qty, Side, Trade};

/// Tracks a fixed-size window of observed mid prices and buys when the
/// short-term mean rises above the long-term mean, sells on the reverse
/// crossover. Always trades with a market order — momentum strategies in
/// this reference scenario chase, they do not quote.
#[derive(Debug, Clone)]
pub struct MomentumAgent {
    id: String,
    arrival_rate: f64,
    qty: Qty,
    short_window: usize,
    long_window: usize,
    mids: VecDeque<f64>,
    inventory: f64,
}

impl MomentumAgent {
    pub fn new(
        id: impl Into<String>,
        arrival_rate: f64,
        qty: Qty,
        short_window: usize,
        long_window: usize,
    ) -> Self {
        assert!(
            short_window < long_window,
            "short_window must be strictly smaller than long_window"
        );
        Self {
            id: id.into(),
            arrival_rate,
            qty,
            short_window,
            long_window,
            mids: VecDeque::with_capacity(long_window),
            inventory: 0.0,
        }
    }

    fn sma(&self, window: usize) -> Option<f64> {
        if self.mids.len() < window {
            return None;
        }
        let sum: f64 = self.mids.iter().rev().take(window).sum();
        Some(sum / window as f64)
    }
}

impl Agent for MomentumAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    fn get_action(&mut self, state: &MarketState, _rng: &mut ChaCha8Rng) -> Vec<Action> {
        let Some(mid) = state.mid else {
            return vec![];
        };
        self.mids.push_back(mid);
        if self.mids.len() > self.long_window {
            self.mids.pop_front();
        }

        let (Some(short), Some(long)) = (self.sma(self.short_window), self.sma(self.long_window))
        else {
            return vec![];
        };

        if short > long {
            vec![Action::PlaceMarket {
                side: Side::Buy,
                qty: self.qty,
            }]
        } else if short < long {
            vec![Action::PlaceMarket {
                side: Side::Sell,
                qty: self.qty,
            }]
        } else {
            vec![]
        }
    }

    fn on_trade(&mut self, trade: &Trade, my_side: Side) {
        let qty = trade.qty as f64;
        match my_side {
            Side::Buy => self.inventory += qty,
            Side::Sell => self.inventory -= qty,
        }
    }

    fn inventory(&self) -> f64 {
        self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderBook;
    use rand::SeedableRng;

    fn state(mid: f64) -> MarketState {
        let book = OrderBook::new();
        MarketState {
            best_bid: None,
            best_ask: None,
            mid: Some(mid),
            l2: book.current_snapshot(),
        }
    }

    #[test]
    fn no_action_before_window_is_full() {
        let mut agent = MomentumAgent::new("M", 1.0, 5, 2, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for mid in [100.0, 101.0] {
            assert!(agent.get_action(&state(mid), &mut rng).is_empty());
        }
    }

    #[test]
    fn buys_when_short_sma_rises_above_long_sma() {
        let mut agent = MomentumAgent::new("M", 1.0, 5, 2, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mids = [100.0, 100.0, 100.0, 105.0, 110.0];
        let mut last = vec![];
        for mid in mids {
            last = agent.get_action(&state(mid), &mut rng);
        }
        assert_eq!(last, vec![Action::PlaceMarket { side: Side::Buy, qty: 5 }]);
    }
}
