//! Convenience constructors layered over [`OrderBook::submit`].

use super::book::OrderBook;
use super::order::{Order, Price, Qty, Side, Time};
use super::trade::Trade;

impl OrderBook {
    /// Builds and submits a limit order.
    pub fn submit_limit(
        &mut self,
        order_id: impl Into<String>,
        side: Side,
        price: Price,
        qty: Qty,
        timestamp: Time,
    ) -> Vec<Trade> {
        self.submit(Order {
            order_id: order_id.into(),
            side,
            price: Some(price),
            qty,
            timestamp,
        })
    }

    /// Builds and submits a market order.
    pub fn submit_market(
        &mut self,
        order_id: impl Into<String>,
        side: Side,
        qty: Qty,
        timestamp: Time,
    ) -> Vec<Trade> {
        self.submit(Order {
            order_id: order_id.into(),
            side,
            price: None,
            qty,
            timestamp,
        })
    }
}
