//! Transaction coordinator service.
//!
//! Accepts a batch of line items, validates each against the stock store,
//! and applies all deltas and all ledger appends as one atomic unit, or
//! applies none. Side effects are strictly confined to the commit step;
//! everything before it is pure reads and validation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use kardex_shared::config::CoordinatorConfig;
use kardex_shared::types::MovementId;

use super::locks::ProductLocks;
use super::types::LineItem;
use super::validation::validate_batch;
use crate::error::EngineError;
use crate::movement::{MovementLedger, NewMovement, TransactionReference};
use crate::stock::StockStore;

/// Coordinates atomic multi-line stock transactions.
pub struct TransactionCoordinator<S, L> {
    store: Arc<S>,
    ledger: Arc<L>,
    locks: ProductLocks,
    lock_wait: Duration,
}

impl<S, L> TransactionCoordinator<S, L>
where
    S: StockStore,
    L: MovementLedger,
{
    /// Creates a coordinator from configuration.
    #[must_use]
    pub fn new(store: Arc<S>, ledger: Arc<L>, config: &CoordinatorConfig) -> Self {
        Self::with_lock_wait(store, ledger, Duration::from_millis(config.lock_wait_ms))
    }

    /// Creates a coordinator with an explicit lock-wait bound.
    #[must_use]
    pub fn with_lock_wait(store: Arc<S>, ledger: Arc<L>, lock_wait: Duration) -> Self {
        Self {
            store,
            ledger,
            locks: ProductLocks::new(),
            lock_wait,
        }
    }

    /// Submits a transaction: all lines commit, or none do.
    ///
    /// 1. Shape validation (empty batch, duplicates, zero deltas).
    /// 2. Ordered lock acquisition over the affected products, bounded by
    ///    the configured wait.
    /// 3. Under the held locks: read every balance and compute the new
    ///    one; any line that would go negative aborts the whole batch.
    /// 4. Write all new balances and append one movement per line, all
    ///    sharing one commit timestamp.
    ///
    /// Locks release on every exit path when the guard set drops.
    ///
    /// # Errors
    ///
    /// See [`EngineError`]; every error leaves stock and ledger untouched.
    pub async fn submit(
        &self,
        reference: TransactionReference,
        lines: Vec<LineItem>,
    ) -> Result<Vec<MovementId>, EngineError> {
        let batch = validate_batch(lines)?;

        let _held = self
            .locks
            .acquire_ordered(&batch.ordered_products, self.lock_wait)
            .await?;

        // Read and validate every line before writing anything.
        let mut balances = Vec::with_capacity(batch.lines.len());
        for line in &batch.lines {
            let level = self.store.get_stock(line.product_id).await?;
            let after = level.after_delta(line.product_id, line.delta)?;
            if after < 0 {
                warn!(
                    product_id = %line.product_id,
                    kind = %reference.kind,
                    requested = line.delta.saturating_abs(),
                    available = level.on_hand,
                    "transaction aborted: insufficient stock"
                );
                return Err(EngineError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.delta.saturating_abs(),
                    available: level.on_hand,
                });
            }
            balances.push((level.on_hand, after));
        }

        // Commit: every line validated, write balances and ledger rows.
        let occurred_at = Utc::now();
        let mut movement_ids = Vec::with_capacity(batch.lines.len());
        for (line, (before, after)) in batch.lines.iter().zip(balances) {
            self.store
                .set_stock(line.product_id, after, line.new_unit_cost)
                .await?;
            let movement_id = self
                .ledger
                .append(NewMovement {
                    product_id: line.product_id,
                    occurred_at,
                    kind: reference.kind,
                    delta: line.delta,
                    balance_before: before,
                    balance_after: after,
                    reference,
                    note: line.note.clone(),
                })
                .await?;
            movement_ids.push(movement_id);
        }

        info!(
            reference_id = %reference.id,
            kind = %reference.kind,
            lines = movement_ids.len(),
            "transaction committed"
        );
        Ok(movement_ids)
    }
}


#[cfg(test)]
mod tests {
    use super::testkit::{TestLedger, TestStore};
    use super::*;
    use crate::movement::MovementKind;
    use kardex_shared::types::{ProductId, SaleId};
    use rust_decimal_macros::dec;

    fn coordinator(
        store: TestStore,
    ) -> (
        TransactionCoordinator<TestStore, TestLedger>,
        Arc<TestStore>,
        Arc<TestLedger>,
    ) {
        let store = Arc::new(store);
        let ledger = Arc::new(TestLedger::default());
        let coordinator = TransactionCoordinator::with_lock_wait(
            Arc::clone(&store),
            Arc::clone(&ledger),
            Duration::from_millis(200),
        );
        (coordinator, store, ledger)
    }

    fn sale_reference() -> TransactionReference {
        TransactionReference::sale(SaleId::new())
    }

    #[tokio::test]
    async fn test_commit_updates_stock_and_ledger() {
        let product = ProductId::new();
        let (coordinator, store, ledger) =
            coordinator(TestStore::default().with_product(product, 10, dec!(2.00)));

        let ids = coordinator
            .submit(sale_reference(), vec![LineItem::new(product, -3)])
            .await
            .unwrap();

        assert_eq!(ids.len(), 1);
        assert_eq!(store.level(product).unwrap().on_hand, 7);

        let movements = ledger.all();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].id, ids[0]);
        assert_eq!(movements[0].kind, MovementKind::Sale);
        assert_eq!(movements[0].delta, -3);
        assert_eq!(movements[0].balance_before, 10);
        assert_eq!(movements[0].balance_after, 7);
    }

    #[tokio::test]
    async fn test_insufficient_stock_aborts_whole_batch() {
        let p1 = ProductId::new();
        let p2 = ProductId::new();
        let (coordinator, store, ledger) = coordinator(
            TestStore::default()
                .with_product(p1, 10, dec!(1.00))
                .with_product(p2, 2, dec!(1.00)),
        );

        let result = coordinator
            .submit(
                sale_reference(),
                vec![LineItem::new(p1, -3), LineItem::new(p2, -1_000_000)],
            )
            .await;

        assert!(matches!(
            result,
            Err(EngineError::InsufficientStock {
                product_id,
                requested: 1_000_000,
                available: 2,
            }) if product_id == p2
        ));
        // Atomicity: the valid line was not applied either.
        assert_eq!(store.level(p1).unwrap().on_hand, 10);
        assert_eq!(store.level(p2).unwrap().on_hand, 2);
        assert!(ledger.all().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_aborts_without_writes() {
        let known = ProductId::new();
        let unknown = ProductId::new();
        let (coordinator, store, ledger) =
            coordinator(TestStore::default().with_product(known, 5, dec!(1.00)));

        let result = coordinator
            .submit(
                sale_reference(),
                vec![LineItem::new(known, -1), LineItem::new(unknown, -1)],
            )
            .await;

        assert!(matches!(
            result,
            Err(EngineError::ProductNotFound(p)) if p == unknown
        ));
        assert_eq!(store.level(known).unwrap().on_hand, 5);
        assert!(ledger.all().is_empty());
    }

    #[tokio::test]
    async fn test_cost_updated_only_when_supplied() {
        let product = ProductId::new();
        let (coordinator, store, _ledger) =
            coordinator(TestStore::default().with_product(product, 10, dec!(2.00)));

        coordinator
            .submit(sale_reference(), vec![LineItem::new(product, -2)])
            .await
            .unwrap();
        assert_eq!(store.level(product).unwrap().unit_cost, dec!(2.00));

        coordinator
            .submit(
                TransactionReference::purchase(kardex_shared::types::PurchaseId::new()),
                vec![LineItem::inflow_with_cost(product, 5, dec!(2.75))],
            )
            .await
            .unwrap();
        let level = store.level(product).unwrap();
        assert_eq!(level.on_hand, 13);
        assert_eq!(level.unit_cost, dec!(2.75));
    }

    #[tokio::test]
    async fn test_multi_line_shares_commit_timestamp() {
        let p1 = ProductId::new();
        let p2 = ProductId::new();
        let (coordinator, _store, ledger) = coordinator(
            TestStore::default()
                .with_product(p1, 10, dec!(1.00))
                .with_product(p2, 10, dec!(1.00)),
        );

        coordinator
            .submit(
                sale_reference(),
                vec![LineItem::new(p1, -1), LineItem::new(p2, -2)],
            )
            .await
            .unwrap();

        let movements = ledger.all();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].occurred_at, movements[1].occurred_at);
        assert_eq!(movements[0].reference, movements[1].reference);
    }

    #[tokio::test]
    async fn test_draining_to_exactly_zero_is_allowed() {
        let product = ProductId::new();
        let (coordinator, store, _ledger) =
            coordinator(TestStore::default().with_product(product, 4, dec!(1.00)));

        coordinator
            .submit(sale_reference(), vec![LineItem::new(product, -4)])
            .await
            .unwrap();
        assert_eq!(store.level(product).unwrap().on_hand, 0);
    }

    #[tokio::test]
    async fn test_invalid_batch_rejected_before_any_read() {
        let product = ProductId::new();
        // Store is empty on purpose: validation must fire before the
        // store is consulted, so EmptyBatch wins over ProductNotFound.
        let (coordinator, _store, ledger) = coordinator(TestStore::default());

        let result = coordinator.submit(sale_reference(), vec![]).await;
        assert!(matches!(result, Err(EngineError::EmptyBatch)));

        let result = coordinator
            .submit(sale_reference(), vec![LineItem::new(product, 0)])
            .await;
        assert!(matches!(result, Err(EngineError::ZeroDelta(_))));
        assert!(ledger.all().is_empty());
    }
}
