//! Operation façades: Sale, Purchase, Adjustment.
//!
//! Thin, named entry points over the transaction coordinator. Each façade
//! encodes the sign convention and validation rules of one business
//! operation; the atomicity, locking, and balance rules live in the
//! coordinator and are shared by all three.

pub mod adjustment;
pub mod purchase;
pub mod sale;

use std::sync::Arc;

use kardex_shared::config::EngineConfig;
use kardex_shared::types::{PageRequest, PageResponse, ProductId};

use crate::catalog::Catalog;
use crate::coordinator::TransactionCoordinator;
use crate::error::EngineError;
use crate::movement::{Movement, MovementLedger};
use crate::stock::{StockLevel, StockStore};

pub use adjustment::{AdjustmentLine, AdjustmentReason, AdjustmentReceipt};
pub use purchase::{PurchaseLine, PurchaseReceipt};
pub use sale::{SaleLine, SaleReceipt};

/// The engine's caller-facing surface.
///
/// Owns the coordinator plus handles to the catalog, store, and ledger.
/// Submission entry points are defined in the per-operation modules;
/// read paths (stock level, movement history) live here.
pub struct Operations<C, S, L> {
    pub(crate) catalog: Arc<C>,
    pub(crate) store: Arc<S>,
    pub(crate) ledger: Arc<L>,
    pub(crate) coordinator: TransactionCoordinator<S, L>,
    history_per_page: u32,
}

impl<C, S, L> Operations<C, S, L>
where
    C: Catalog,
    S: StockStore,
    L: MovementLedger,
{
    /// Wires the façades over a catalog, store, and ledger.
    #[must_use]
    pub fn new(catalog: Arc<C>, store: Arc<S>, ledger: Arc<L>, config: &EngineConfig) -> Self {
        let coordinator = TransactionCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&ledger),
            &config.coordinator,
        );
        Self {
            catalog,
            store,
            ledger,
            coordinator,
            history_per_page: config.history.per_page,
        }
    }

    /// Reads a product's current stock level.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ProductNotFound`] for unknown products.
    pub async fn stock_level(&self, product_id: ProductId) -> Result<StockLevel, EngineError> {
        self.store.get_stock(product_id).await
    }

    /// Reads a product's movement history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the ledger cannot be read.
    pub async fn history(
        &self,
        product_id: ProductId,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, EngineError> {
        self.ledger.list_by_product(product_id, page).await
    }

    /// Reads the first page of a product's history at the configured
    /// default page size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the ledger cannot be read.
    pub async fn recent_history(
        &self,
        product_id: ProductId,
    ) -> Result<PageResponse<Movement>, EngineError> {
        self.history(product_id, PageRequest::new(1, self.history_per_page))
            .await
    }
}
