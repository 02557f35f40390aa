//! Property tests for the book's quantified invariants, run over random
//! sequences of submissions and cancels.

use lob_sim::orderbook::{OrderBook, Side, vwap};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Limit { side: Side, price: i64, qty: u64 },
    Market { side: Side, qty: u64 },
    Cancel { target: usize },
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (side_strategy(), 90i64..110, 1u64..20)
            .prop_map(|(side, price, qty)| Op::Limit { side, price, qty }),
        1 => (side_strategy(), 1u64..20).prop_map(|(side, qty)| Op::Market { side, qty }),
        1 => (0usize..50).prop_map(|target| Op::Cancel { target }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn book_never_crosses_and_trades_respect_maker_price(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut book = OrderBook::new();
        let mut submitted_ids = Vec::new();
        let mut time = 0.0f64;

        for op in ops {
            time += 1.0;
            match op {
                Op::Limit { side, price, qty } => {
                    if qty == 0 {
                        continue;
                    }
                    let id = format!("L{}", submitted_ids.len());
                    let trades = book.submit_limit(id.clone(), side, price, qty, time);
                    for trade in &trades {
                        prop_assert!(trade.qty > 0);
                    }
                    submitted_ids.push(id);
                }
                Op::Market { side, qty } => {
                    if qty == 0 {
                        continue;
                    }
                    let id = format!("M{}", submitted_ids.len());
                    book.submit_market(id.clone(), side, qty, time);
                    submitted_ids.push(id);
                }
                Op::Cancel { target } => {
                    if let Some(id) = submitted_ids.get(target % submitted_ids.len().max(1)) {
                        book.cancel(id);
                    }
                }
            }

            let snapshot = book.current_snapshot();
            if let (Some(bid), Some(ask)) = (snapshot.best_bid(), snapshot.best_ask()) {
                prop_assert!(bid < ask, "book crossed: bid {bid} >= ask {ask}");
            }
        }

        let trades = book.trades();
        if !trades.is_empty() {
            let v = vwap(trades).unwrap();
            let min = trades.iter().map(|t| t.price).min().unwrap() as f64;
            let max = trades.iter().map(|t| t.price).max().unwrap() as f64;
            prop_assert!(v >= min && v <= max);
        }
    }

    #[test]
    fn cancel_of_any_id_twice_is_idempotent(price in 90i64..110, qty in 1u64..20) {
        let mut book = OrderBook::new();
        book.submit_limit("A", Side::Buy, price, qty, 1.0);
        book.cancel("A");
        let after_first = book.current_snapshot();
        book.cancel("A");
        let after_second = book.current_snapshot();
        prop_assert_eq!(after_first, after_second);
    }
}
