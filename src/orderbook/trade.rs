//! Trade records emitted by the matching engine.

use super::order::{Price, Qty};
use serde::{Deserialize, Serialize};

/// A single execution between a resting (maker) order and an incoming
/// (taker) order.
///
/// Trades are append-only: once pushed to [`crate::orderbook::OrderBook`]'s
/// trade log they are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution price — always the resting (maker) order's price, never
    /// the taker's limit.
    pub price: Price,
    /// Quantity executed. Always positive.
    pub qty: Qty,
    /// Order id of the buy side of this trade.
    pub buy_order_id: String,
    /// Order id of the sell side of this trade.
    pub sell_order_id: String,
}

impl Trade {
    /// The order id of whichever side is the maker for the given `side`.
    pub fn order_id_for(&self, side: super::order::Side) -> &str {
        match side {
            super::order::Side::Buy => &self.buy_order_id,
            super::order::Side::Sell => &self.sell_order_id,
        }
    }
}

/// Volume-weighted average price over a slice of trades.
///
/// Returns `None` for an empty slice. Bounded by `min(price) <= vwap <=
/// max(price)` for any non-empty input, per the book's testable invariants.
pub fn vwap(trades: &[Trade]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    let (notional, volume) = trades.iter().fold((0.0, 0u64), |(notional, volume), t| {
        (notional + t.price as f64 * t.qty as f64, volume + t.qty)
    });
    if volume == 0 {
        None
    } else {
        Some(notional / volume as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::order::Side;

    fn trade(price: Price, qty: Qty) -> Trade {
        Trade {
            price,
            qty,
            buy_order_id: "B-0".into(),
            sell_order_id: "S-0".into(),
        }
    }

    #[test]
    fn vwap_of_empty_log_is_none() {
        assert_eq!(vwap(&[]), None);
    }

    #[test]
    fn vwap_is_within_price_range() {
        let trades = vec![trade(100, 10), trade(105, 5), trade(98, 20)];
        let v = vwap(&trades).unwrap();
        let min = trades.iter().map(|t| t.price).min().unwrap() as f64;
        let max = trades.iter().map(|t| t.price).max().unwrap() as f64;
        assert!(v >= min && v <= max, "vwap {v} not within [{min}, {max}]");
    }

    #[test]
    fn order_id_for_selects_correct_side() {
        let t = trade(100, 1);
        assert_eq!(t.order_id_for(Side::Buy), "B-0");
        assert_eq!(t.order_id_for(Side::Sell), "S-0");
    }
}
