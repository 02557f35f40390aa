//! Order book error types

use thiserror::Error;

/// Errors that can occur within the [`crate::orderbook::OrderBook`].
///
/// The book never fails on ill-formed input — quantization and validation
/// of orders is the environment's responsibility (see
/// [`crate::environment::Environment::apply_action`]). The only failure
/// mode here is a programmer error: asking for a snapshot keyed by an order
/// id the book was never asked to process.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// [`crate::orderbook::OrderBook::book_after`] was called with an order
    /// id that has no recorded post-submit snapshot.
    #[error("no snapshot recorded for order {0}")]
    UnknownOrderId(String),
}
