//! Core `OrderBook` implementation: price-level ladders and order lookup.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{info, trace};

use super::error::OrderBookError;
use super::order::{Order, Price, RestingOrder, Side};
use super::snapshot::{BookSnapshot, Level};
use super::trade::Trade;

/// A price-time-priority limit order book.
///
/// Bids and asks are each stored as a map from price to a FIFO queue of
/// resting orders at that price. Bids are walked from the highest key down,
/// asks from the lowest key up, so both sides share the same queue
/// mechanics and only the iteration direction differs.
#[derive(Debug, Default)]
pub struct OrderBook {
    pub(super) bids: BTreeMap<Price, VecDeque<RestingOrder>>,
    pub(super) asks: BTreeMap<Price, VecDeque<RestingOrder>>,
    /// `order_id -> (price, side)`, maintained alongside the ladders so
    /// `cancel` never has to scan either side.
    order_locations: HashMap<String, (Price, Side)>,
    /// Append-only trade log, in emission order.
    trades: Vec<Trade>,
    /// Snapshot recorded immediately after each `submit`, keyed by the
    /// order id that triggered it.
    post_submit_snapshots: HashMap<String, BookSnapshot>,
    /// Monotonically increasing insertion sequence, the final tie-break
    /// when two resting orders share `(price, timestamp)`.
    next_seq: u64,
}

impl OrderBook {
    /// An empty book with no resting orders and no trade history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits `order`, matching it against the opposite side and resting
    /// any limit residual. Returns the trades emitted by this submission,
    /// in execution order.
    ///
    /// A post-submit snapshot is always recorded under `order.order_id`,
    /// retrievable later via [`OrderBook::book_after`].
    pub fn submit(&mut self, mut order: Order) -> Vec<Trade> {
        trace!(order_id = %order.order_id, side = %order.side, price = ?order.price, qty = order.qty, "submit");
        let order_id = order.order_id.clone();
        let trades = self.match_incoming(&mut order);
        if let Some(price) = order.price {
            if order.qty > 0 {
                self.rest(order, price);
            }
        }
        if !trades.is_empty() {
            info!(count = trades.len(), "trades emitted");
        }
        let snapshot = self.current_snapshot();
        self.post_submit_snapshots.insert(order_id, snapshot);
        trades
    }

    /// Removes every resting order with id `order_id` from either side.
    /// A no-op if no such order rests on the book.
    ///
    /// Scans both ladders directly rather than trusting
    /// `order_locations` alone: that index remembers only the most
    /// recent resting location for a given id, so if two resting orders
    /// ever end up sharing an id (a caller bug — ids are supposed to be
    /// unique) a location-only cancel would strand the other one as an
    /// uncancellable ghost. The scan is the backstop that keeps `cancel`
    /// true to its contract regardless.
    pub fn cancel(&mut self, order_id: &str) {
        self.order_locations.remove(order_id);
        let mut removed = false;
        for side in [Side::Buy, Side::Sell] {
            let ladder = self.ladder_mut(side);
            let mut emptied = Vec::new();
            for (&price, queue) in ladder.iter_mut() {
                let before = queue.len();
                queue.retain(|resting| resting.order_id != order_id);
                if queue.len() != before {
                    removed = true;
                }
                if queue.is_empty() {
                    emptied.push(price);
                }
            }
            for price in emptied {
                ladder.remove(&price);
            }
        }
        if removed {
            trace!(order_id, "cancelled");
        } else {
            trace!(order_id, "cancel: no resting order");
        }
    }

    /// With independent probability `prob` per side, removes one
    /// uniformly-chosen resting order from that side. A no-op when
    /// `prob <= 0.0` or a side is empty.
    pub fn cancel_random(&mut self, prob: f64, rng: &mut impl rand::Rng) {
        if prob <= 0.0 {
            return;
        }
        for side in [Side::Buy, Side::Sell] {
            if rng.random::<f64>() >= prob {
                continue;
            }
            let ids: Vec<String> = self
                .ladder(side)
                .values()
                .flat_map(|queue| queue.iter().map(|o| o.order_id.clone()))
                .collect();
            if let Some(id) = pick_uniform(&ids, rng) {
                self.cancel(&id);
            }
        }
    }

    /// An aggregated, immutable view over the book's current state.
    pub fn current_snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: aggregate(self.bids.iter().rev()),
            asks: aggregate(self.asks.iter()),
        }
    }

    /// The snapshot recorded immediately after `order_id` was submitted.
    pub fn book_after(&self, order_id: &str) -> Result<&BookSnapshot, OrderBookError> {
        self.post_submit_snapshots
            .get(order_id)
            .ok_or_else(|| OrderBookError::UnknownOrderId(order_id.to_string()))
    }

    /// The full trade log, in emission order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of orders currently resting on `side`.
    pub fn resting_count(&self, side: Side) -> usize {
        self.ladder(side).values().map(VecDeque::len).sum()
    }

    /// Remaining quantity of `order_id` if it is still resting, else 0.
    pub fn resting_qty_of(&self, order_id: &str) -> super::order::Qty {
        let Some(&(price, side)) = self.order_locations.get(order_id) else {
            return 0;
        };
        self.ladder(side)
            .get(&price)
            .and_then(|queue| queue.iter().find(|o| o.order_id == order_id))
            .map(|o| o.qty)
            .unwrap_or(0)
    }

    pub(super) fn ladder(&self, side: Side) -> &BTreeMap<Price, VecDeque<RestingOrder>> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn ladder_mut(&mut self, side: Side) -> &mut BTreeMap<Price, VecDeque<RestingOrder>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub(super) fn push_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub(super) fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Reserves a fresh, book-wide monotonically increasing sequence
    /// number. Exposed so callers that build order ids outside this
    /// module (the environment, when several actions from one arrival
    /// share the same timestamp) can fold it in and guarantee every id
    /// submitted to this book is unique.
    pub fn reserve_sequence(&mut self) -> u64 {
        self.next_seq()
    }

    pub(super) fn forget_location(&mut self, order_id: &str) {
        self.order_locations.remove(order_id);
    }

    fn rest(&mut self, order: Order, price: Price) {
        let seq = self.next_seq();
        let resting = RestingOrder {
            order_id: order.order_id.clone(),
            side: order.side,
            price,
            qty: order.qty,
            timestamp: order.timestamp,
            seq,
        };
        self.order_locations
            .insert(resting.order_id.clone(), (price, order.side));
        self.ladder_mut(order.side)
            .entry(price)
            .or_default()
            .push_back(resting);
    }
}

fn aggregate<'a>(
    levels: impl Iterator<Item = (&'a Price, &'a VecDeque<RestingOrder>)>,
) -> Vec<Level> {
    levels
        .map(|(&price, queue)| Level {
            price,
            qty: queue.iter().map(|o| o.qty).sum(),
        })
        .collect()
}

fn pick_uniform(ids: &[String], rng: &mut impl rand::Rng) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        let idx = rng.random_range(0..ids.len());
        Some(ids[idx].clone())
    }
}
