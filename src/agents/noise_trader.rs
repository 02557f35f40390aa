//! Budget- and inventory-constrained trader around a shared fair value.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::environment::{Action, MarketState};
use crate::fair_value::FairValue;
use crate::orderbook::{Qty, Side, Trade};

/// Starts with a non-zero inventory endowment rather than flat zero.
/// Refuses to trade once its budget or inventory constraints would be
/// violated (a refusal is a silent `vec![]`, never an error). 70% of
/// arrivals submit a market order; the remainder submit an aggressive
/// limit order priced through the fair value.
#[derive(Debug, Clone)]
pub struct NoiseTraderAgent {
    id: String,
    arrival_rate: f64,
    qty: Qty,
    budget: f64,
    max_abs_inventory: f64,
    fair_value: Rc<RefCell<FairValue>>,
    inventory: f64,
    cash: f64,
}

impl NoiseTraderAgent {
    /// Starts with an inventory endowment of 10 units, matching the
    /// reference scenario this agent is drawn from.
    pub fn new(
        id: impl Into<String>,
        arrival_rate: f64,
        qty: Qty,
        budget: f64,
        max_abs_inventory: f64,
        fair_value: Rc<RefCell<FairValue>>,
    ) -> Self {
        Self {
            id: id.into(),
            arrival_rate,
            qty,
            budget,
            max_abs_inventory,
            fair_value,
            inventory: 10.0,
            cash: 0.0,
        }
    }
}

impl Agent for NoiseTraderAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    fn get_action(&mut self, _state: &MarketState, rng: &mut ChaCha8Rng) -> Vec<Action> {
        if self.inventory.abs() >= self.max_abs_inventory {
            return vec![];
        }
        let side = if self.inventory >= 0.0 {
            if rng.random_bool(0.5) { Side::Buy } else { Side::Sell }
        } else if rng.random_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };

        let notional = self.qty as f64 * self.fair_value.borrow().get();
        if notional > self.budget {
            return vec![];
        }

        if rng.random_bool(0.7) {
            vec![Action::PlaceMarket {
                side,
                qty: self.qty,
            }]
        } else {
            let fv = self.fair_value.borrow().get();
            let aggressive = match side {
                Side::Buy => fv + 1.0,
                Side::Sell => fv - 1.0,
            };
            vec![Action::PlaceLimit {
                side,
                price: aggressive,
                qty: self.qty,
            }]
        }
    }

    fn on_trade(&mut self, trade: &Trade, my_side: Side) {
        let qty = trade.qty as f64;
        match my_side {
            Side::Buy => {
                self.inventory += qty;
                self.cash -= qty * trade.price as f64;
            }
            Side::Sell => {
                self.inventory -= qty;
                self.cash += qty * trade.price as f64;
            }
        }
    }

    fn inventory(&self) -> f64 {
        self.inventory
    }
}
