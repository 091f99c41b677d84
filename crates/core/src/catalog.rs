//! Read contract for the external product catalog.
//!
//! Product identity, naming, and pricing are owned by the catalog service;
//! the engine only ever reads from it. The sale façade re-reads unit
//! prices here so each sale freezes the price in effect at commit time.

use async_trait::async_trait;
use rust_decimal::Decimal;

use kardex_shared::types::ProductId;

use crate::error::EngineError;

/// Read-only view of the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns true if the product exists in the catalog.
    async fn product_exists(&self, product_id: ProductId) -> Result<bool, EngineError>;

    /// Returns the current selling price for a product.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProductNotFound`] if the product does not exist.
    async fn unit_price(&self, product_id: ProductId) -> Result<Decimal, EngineError>;
}
