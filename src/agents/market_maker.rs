//! Inventory-skewed symmetric quoter.

use std::collections::HashMap;

use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::environment::{Action, MarketState};
use crate::orderbook::{Qty, Side, Trade};

/// Posts a two-sided quote around mid every arrival, skewing both prices
/// away from inventory (long skews quotes down to encourage selling,
/// short skews up to encourage buying) and widening as inventory grows.
/// Refuses to add further exposure past `max_inventory`.
#[derive(Debug, Clone)]
pub struct MarketMakerAgent {
    id: String,
    arrival_rate: f64,
    half_spread: f64,
    skew_per_unit: f64,
    qty: Qty,
    max_inventory: f64,
    fallback_mid: f64,
    inventory: f64,
    cash: f64,
    active_orders: HashMap<String, Qty>,
}

impl MarketMakerAgent {
    pub fn new(
        id: impl Into<String>,
        arrival_rate: f64,
        half_spread: f64,
        skew_per_unit: f64,
        qty: Qty,
        max_inventory: f64,
        fallback_mid: f64,
    ) -> Self {
        Self {
            id: id.into(),
            arrival_rate,
            half_spread,
            skew_per_unit,
            qty,
            max_inventory,
            fallback_mid,
            inventory: 0.0,
            cash: 0.0,
            active_orders: HashMap::new(),
        }
    }

    /// Net cash plus inventory valued at `mark`, for scenario assertions.
    pub fn pnl(&self, mark: f64) -> f64 {
        self.cash + self.inventory * mark
    }
}

impl Agent for MarketMakerAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    fn get_action(&mut self, state: &MarketState, _rng: &mut ChaCha8Rng) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .active_orders
            .keys()
            .cloned()
            .map(|order_id| Action::Cancel { order_id })
            .collect();
        self.active_orders.clear();

        if self.inventory.abs() >= self.max_inventory {
            return actions;
        }

        let mid = state.mid.unwrap_or(self.fallback_mid);
        let skew = self.inventory * self.skew_per_unit;
        let bid = mid - self.half_spread - skew;
        let ask = mid + self.half_spread - skew;

        actions.push(Action::PlaceLimit {
            side: Side::Buy,
            price: bid,
            qty: self.qty,
        });
        actions.push(Action::PlaceLimit {
            side: Side::Sell,
            price: ask,
            qty: self.qty,
        });
        actions
    }

    fn on_trade(&mut self, trade: &Trade, my_side: Side) {
        let signed_qty = trade.qty as f64;
        match my_side {
            Side::Buy => {
                self.inventory += signed_qty;
                self.cash -= signed_qty * trade.price as f64;
            }
            Side::Sell => {
                self.inventory -= signed_qty;
                self.cash += signed_qty * trade.price as f64;
            }
        }
    }

    fn inventory(&self) -> f64 {
        self.inventory
    }

    fn record_active_order(&mut self, order_id: String, qty: Qty) {
        self.active_orders.insert(order_id, qty);
    }

    fn remove_active_order(&mut self, order_id: &str) {
        self.active_orders.remove(order_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderBook;
    use rand::SeedableRng;

    fn state(mid: Option<f64>) -> MarketState {
        let book = OrderBook::new();
        MarketState {
            best_bid: None,
            best_ask: None,
            mid,
            l2: book.current_snapshot(),
        }
    }

    #[test]
    fn quotes_are_symmetric_around_mid_with_no_inventory() {
        let mut mm = MarketMakerAgent::new("MM", 1.0, 1.0, 0.1, 10, 100.0, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let actions = mm.get_action(&state(Some(100.0)), &mut rng);
        let prices: Vec<f64> = actions
            .iter()
            .filter_map(|a| match a {
                Action::PlaceLimit { price, .. } => Some(*price),
                _ => None,
            })
            .collect();
        assert_eq!(prices, vec![99.0, 101.0]);
    }

    #[test]
    fn refuses_to_quote_past_max_inventory() {
        let mut mm = MarketMakerAgent::new("MM", 1.0, 1.0, 0.1, 10, 5.0, 100.0);
        mm.on_trade(
            &Trade {
                price: 100,
                qty: 10,
                buy_order_id: "MM-1".into(),
                sell_order_id: "X-1".into(),
            },
            Side::Buy,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let actions = mm.get_action(&state(Some(100.0)), &mut rng);
        assert!(actions.iter().all(|a| matches!(a, Action::Cancel { .. })));
    }

    #[test]
    fn cancels_prior_quotes_before_posting_new_ones() {
        let mut mm = MarketMakerAgent::new("MM", 1.0, 1.0, 0.1, 10, 100.0, 100.0);
        mm.active_orders.insert("MM-1".into(), 10);
        mm.active_orders.insert("MM-2".into(), 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let actions = mm.get_action(&state(Some(100.0)), &mut rng);
        let cancels = actions
            .iter()
            .filter(|a| matches!(a, Action::Cancel { .. }))
            .count();
        assert_eq!(cancels, 2);
    }
}
