//! Movement ledger contract.

use async_trait::async_trait;

use kardex_shared::types::{MovementId, PageRequest, PageResponse, ProductId};

use crate::error::EngineError;

/// Append-only log of stock-changing events.
///
/// The trait deliberately has no update or delete method: once appended,
/// a movement is part of the permanent audit trail. `append` is only ever
/// called from inside the coordinator's commit step, under the product's
/// lock, and is never rolled back independently of the transaction.
#[async_trait]
pub trait MovementLedger: Send + Sync {
    /// Appends a movement and returns its ledger-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] on a durability failure.
    async fn append(&self, movement: super::NewMovement) -> Result<MovementId, EngineError>;

    /// Lists a product's movements, newest first.
    ///
    /// The read is finite and restartable: calling it twice with no
    /// intervening writes returns identical pages.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backend cannot be read.
    async fn list_by_product(
        &self,
        product_id: ProductId,
        page: PageRequest,
    ) -> Result<PageResponse<super::Movement>, EngineError>;
}
