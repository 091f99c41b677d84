//! Per-product lock table.
//!
//! Each product has one async mutex; a transaction touching products
//! `{A, B}` blocks only against other transactions that also touch `A` or
//! `B`. Locks are always acquired in ascending product-id order (the
//! caller passes the sorted list from batch validation), so two
//! concurrent transactions sharing products attempt acquisition in the
//! same relative order and cannot deadlock.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use kardex_shared::types::ProductId;

use crate::error::EngineError;

/// Lock table keyed by product id.
///
/// Entries are created lazily on first contact with a product and kept
/// for the lifetime of the table; an idle mutex is a few words.
#[derive(Debug, Default)]
pub struct ProductLocks {
    locks: DashMap<ProductId, Arc<Mutex<()>>>,
}

/// Guards for one transaction's products. Dropping this releases every
/// lock, on every exit path.
#[derive(Debug)]
pub struct LockSet {
    guards: Vec<OwnedMutexGuard<()>>,
}

impl LockSet {
    /// Number of locks held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// True if no locks are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl ProductLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mutex_for(&self, product_id: ProductId) -> Arc<Mutex<()>> {
        self.locks
            .entry(product_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquires exclusive locks for every product, in the order given.
    ///
    /// `ordered_products` must already be sorted ascending; the
    /// coordinator always passes the sorted distinct ids from batch
    /// validation. The bound covers the whole acquisition: on expiry the
    /// partially collected guards are dropped and nothing stays held.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] if the locks could not all be
    /// acquired within `wait`.
    pub async fn acquire_ordered(
        &self,
        ordered_products: &[ProductId],
        wait: Duration,
    ) -> Result<LockSet, EngineError> {
        debug_assert!(ordered_products.is_sorted());

        let acquire_all = async {
            let mut guards = Vec::with_capacity(ordered_products.len());
            for product_id in ordered_products {
                let mutex = self.mutex_for(*product_id);
                guards.push(mutex.lock_owned().await);
                debug!(%product_id, "product lock acquired");
            }
            LockSet { guards }
        };

        match tokio::time::timeout(wait, acquire_all).await {
            Ok(set) => Ok(set),
            Err(_) => Err(EngineError::Busy {
                waited_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}
