//! Property-based tests for the transaction coordinator.
//!
//! Properties:
//! - Non-negativity: committed stock never goes below zero
//! - Ledger reconciliation: final stock == initial stock + sum of
//!   committed deltas, for any sequence of submissions
//! - Bracketing: every movement's before/after pair matches its delta

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use rust_decimal_macros::dec;

use kardex_shared::types::{ProductId, SaleId};

use super::service::TransactionCoordinator;
use super::service::testkit::{TestLedger, TestStore};
use super::types::LineItem;
use crate::movement::TransactionReference;

/// Signed deltas small enough that some submissions succeed and some
/// fail against the initial balance.
fn delta_sequence() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(
        prop_oneof![1i64..=20, -20i64..=-1],
        1..30,
    )
}

fn initial_stock() -> impl Strategy<Value = i64> {
    0i64..=50
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stock_reconciles_with_ledger(initial in initial_stock(), deltas in delta_sequence()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let product = ProductId::new();
            let store = Arc::new(
                TestStore::default().with_product(product, initial, dec!(1.00)),
            );
            let ledger = Arc::new(TestLedger::default());
            let coordinator = TransactionCoordinator::with_lock_wait(
                Arc::clone(&store),
                Arc::clone(&ledger),
                Duration::from_millis(200),
            );

            let mut committed_sum = 0i64;
            for delta in deltas {
                let result = coordinator
                    .submit(
                        TransactionReference::sale(SaleId::new()),
                        vec![LineItem::new(product, delta)],
                    )
                    .await;
                if result.is_ok() {
                    committed_sum += delta;
                }
            }

            let final_stock = store.level(product).unwrap().on_hand;

            // Non-negativity held throughout (checked at the end; an
            // intermediate negative would have been rejected, so the
            // final value can only be >= 0 if every commit was valid).
            prop_assert!(final_stock >= 0);

            // Reconciliation: store agrees with the ledger.
            prop_assert_eq!(final_stock, initial + committed_sum);
            let ledger_sum: i64 = ledger.all().iter().map(|m| m.delta).sum();
            prop_assert_eq!(ledger_sum, committed_sum);

            // Every movement brackets its delta.
            for movement in ledger.all() {
                prop_assert_eq!(
                    movement.balance_before + movement.delta,
                    movement.balance_after
                );
                prop_assert!(movement.balance_after >= 0);
            }
            Ok(())
        })?;
    }

    #[test]
    fn rejected_submissions_leave_no_trace(initial in 0i64..=5, overdraw in 6i64..=100) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let product = ProductId::new();
            let store = Arc::new(
                TestStore::default().with_product(product, initial, dec!(1.00)),
            );
            let ledger = Arc::new(TestLedger::default());
            let coordinator = TransactionCoordinator::with_lock_wait(
                Arc::clone(&store),
                Arc::clone(&ledger),
                Duration::from_millis(200),
            );

            let result = coordinator
                .submit(
                    TransactionReference::sale(SaleId::new()),
                    vec![LineItem::new(product, -overdraw)],
                )
                .await;

            prop_assert!(result.is_err());
            prop_assert_eq!(store.level(product).unwrap().on_hand, initial);
            prop_assert_eq!(ledger.count_for(product), 0);
            Ok(())
        })?;
    }
}
