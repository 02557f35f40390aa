//! Order book snapshot for market data.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::order::{Price, Qty};

/// A single aggregated price level inside a [`BookSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// The price of this level.
    pub price: Price,
    /// Sum of resting quantity across every order at this price.
    pub qty: Qty,
}

/// An immutable, aggregated view of the order book at a point in time.
///
/// A snapshot copies its level data rather than aliasing the live book, so
/// it remains valid even after the book that produced it is mutated
/// further. `bids` is sorted descending by price, `asks` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Bid price levels, descending by price.
    pub bids: Vec<Level>,
    /// Ask price levels, ascending by price.
    pub asks: Vec<Level>,
}

impl BookSnapshot {
    /// Best (highest) resting bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        let price = self.bids.first().map(|l| l.price);
        trace!(?price, "best_bid");
        price
    }

    /// Best (lowest) resting ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        let price = self.asks.first().map(|l| l.price);
        trace!(?price, "best_ask");
        price
    }

    /// Arithmetic mean of best bid and best ask, when both exist.
    pub fn mid(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// `best_ask - best_bid`, when both exist.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Top-`depth` levels on each side.
    pub fn top(&self, depth: usize) -> (&[Level], &[Level]) {
        (
            &self.bids[..self.bids.len().min(depth)],
            &self.asks[..self.asks.len().min(depth)],
        )
    }

    /// Human-readable rendering: `"BIDS:"` then up to `depth` lines of
    /// `"  <price> → <qty>"`, then `"ASKS:"` similarly.
    pub fn pretty(&self, depth: usize) -> String {
        let mut out = vec!["BIDS:".to_string()];
        for level in self.bids.iter().take(depth) {
            out.push(format!("  {:>6} → {}", level.price, level.qty));
        }
        out.push("ASKS:".to_string());
        for level in self.asks.iter().take(depth) {
            out.push(format!("  {:>6} → {}", level.price, level.qty));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(bids: Vec<(Price, Qty)>, asks: Vec<(Price, Qty)>) -> BookSnapshot {
        BookSnapshot {
            bids: bids
                .into_iter()
                .map(|(price, qty)| Level { price, qty })
                .collect(),
            asks: asks
                .into_iter()
                .map(|(price, qty)| Level { price, qty })
                .collect(),
        }
    }

    #[test]
    fn empty_book_has_no_best_prices_or_spread() {
        let s = snap(vec![], vec![]);
        assert_eq!(s.best_bid(), None);
        assert_eq!(s.best_ask(), None);
        assert_eq!(s.mid(), None);
        assert_eq!(s.spread(), None);
    }

    #[test]
    fn mid_and_spread_derive_from_best_levels() {
        let s = snap(vec![(99, 10)], vec![(101, 5)]);
        assert_eq!(s.best_bid(), Some(99));
        assert_eq!(s.best_ask(), Some(101));
        assert_eq!(s.mid(), Some(100.0));
        assert_eq!(s.spread(), Some(2));
    }

    #[test]
    fn pretty_renders_bids_then_asks_up_to_depth() {
        let s = snap(vec![(100, 5), (99, 3)], vec![(101, 2), (102, 7)]);
        let rendered = s.pretty(1);
        assert_eq!(rendered, "BIDS:\n     100 → 5\nASKS:\n     101 → 2");
    }

    #[test]
    fn top_clamps_to_available_levels() {
        let s = snap(vec![(100, 5)], vec![]);
        let (bids, asks) = s.top(5);
        assert_eq!(bids.len(), 1);
        assert_eq!(asks.len(), 0);
    }
}
