//! Stock store contract and the stock-level record it serves.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kardex_shared::types::ProductId;

use crate::error::EngineError;

/// Current stock state of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Units currently on hand. Never negative for committed state.
    pub on_hand: i64,
    /// Current unit cost (last-cost policy: refreshed by purchases).
    pub unit_cost: Decimal,
}

impl StockLevel {
    /// Computes the balance after applying a signed delta.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StockOverflow`] if the addition overflows.
    pub fn after_delta(&self, product_id: ProductId, delta: i64) -> Result<i64, EngineError> {
        self.on_hand
            .checked_add(delta)
            .ok_or(EngineError::StockOverflow(product_id))
    }
}

/// Durable store mapping product id to current quantity and unit cost.
///
/// The store performs unconditional reads and writes; the coordinator only
/// calls `set_stock` while holding that product's lock, from inside a
/// committing transaction.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Reads the current stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProductNotFound`] if the product does not
    /// exist in the catalog.
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, EngineError>;

    /// Writes a new on-hand quantity, optionally refreshing the unit cost.
    ///
    /// Purchases pass `Some(cost)`; sales and adjustments pass `None` and
    /// leave the stored cost untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProductNotFound`] if the product does not
    /// exist, or [`EngineError::Storage`] on a durability failure.
    async fn set_stock(
        &self,
        product_id: ProductId,
        new_on_hand: i64,
        new_unit_cost: Option<Decimal>,
    ) -> Result<(), EngineError>;
}
