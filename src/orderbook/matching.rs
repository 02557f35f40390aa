//! Price-time-priority matching loop.
//!
//! Matching never fails on ill-formed input: an incoming order with a
//! limit price that does not cross simply stops matching and rests (if it
//! has room to). Quantization and validation are the environment's job,
//! not the book's — see `crate::environment::Environment::apply_action`.

use tracing::trace;

use super::book::OrderBook;
use super::order::{Order, Side};
use super::trade::Trade;

impl OrderBook {
    /// Matches `incoming` against the opposite side in place, decrementing
    /// `incoming.qty` and the resting orders it trades against, and
    /// returns the trades emitted.
    ///
    /// Matching stops when `incoming` is exhausted, the opposite side is
    /// empty, or (for a limit order) the best opposing price no longer
    /// crosses. Whatever quantity remains on `incoming` afterwards is the
    /// caller's responsibility: it rests if there's a limit price, or is
    /// implicitly dropped for a market order.
    pub(super) fn match_incoming(&mut self, incoming: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();
        let opposite = incoming.side.opposite();

        while incoming.qty > 0 {
            let Some(best_price) = self.best_price(opposite) else {
                break;
            };
            if let Some(limit) = incoming.price {
                let crosses = match incoming.side {
                    Side::Buy => best_price <= limit,
                    Side::Sell => best_price >= limit,
                };
                if !crosses {
                    break;
                }
            }

            let queue = self
                .ladder_mut(opposite)
                .get_mut(&best_price)
                .expect("best_price came from a non-empty level");
            let resting = queue.front_mut().expect("level is non-empty by construction");

            let trade_qty = incoming.qty.min(resting.qty);
            let (buy_order_id, sell_order_id) = match incoming.side {
                Side::Buy => (incoming.order_id.clone(), resting.order_id.clone()),
                Side::Sell => (resting.order_id.clone(), incoming.order_id.clone()),
            };
            let trade = Trade {
                price: best_price,
                qty: trade_qty,
                buy_order_id,
                sell_order_id,
            };
            trace!(price = trade.price, qty = trade.qty, "trade");

            incoming.qty -= trade_qty;
            resting.qty -= trade_qty;
            let resting_exhausted = resting.qty == 0;
            let resting_id = resting.order_id.clone();

            if resting_exhausted {
                queue.pop_front();
                if queue.is_empty() {
                    self.ladder_mut(opposite).remove(&best_price);
                }
                self.forget_location(&resting_id);
            }

            self.push_trade(trade.clone());
            trades.push(trade);
        }

        trades
    }

    fn best_price(&self, side: Side) -> Option<super::order::Price> {
        match side {
            Side::Buy => self.bids.keys().next_back().copied(),
            Side::Sell => self.asks.keys().next().copied(),
        }
    }
}
