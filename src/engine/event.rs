//! Event payloads dispatched by [`super::Engine`].

use crate::orderbook::{Order, Time};

/// A unit of work the engine can schedule and later dispatch.
///
/// Variants carry only what their handler needs — agent identity for an
/// arrival, the fully-formed order for a submission, depth for a
/// snapshot, the step size for a fair-value update.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An agent wakes up, observes the market, and decides what to do.
    AgentArrival { agent_id: String },
    /// A previously scheduled order arrives on the book.
    OrderSubmission { order: Order },
    /// A recurring market-data capture.
    Snapshot { depth: usize },
    /// A recurring fair-value random-walk step.
    FairValueUpdate { dt: f64 },
    /// Halts the engine at dispatch time, discarding the remaining queue.
    MarketClose,
}

/// An [`Event`] paired with its dispatch time and insertion sequence, the
/// unit actually held in the engine's heap.
///
/// Ordering is `(time, seq)` ascending, matching [`std::cmp::Reverse`]
/// wrapped around a max-heap to get min-heap dispatch order. Two events
/// scheduled for the same `time` dispatch in the order they were
/// scheduled, never out of order, which is what makes replay from a fixed
/// seed deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEvent {
    pub time: Time,
    pub seq: u64,
    pub event: Event,
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}
