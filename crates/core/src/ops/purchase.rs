//! Purchase façade: stock inflow that refreshes the stored unit cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use kardex_shared::types::{MovementId, ProductId, PurchaseId, SupplierId};

use super::Operations;
use crate::catalog::Catalog;
use crate::coordinator::LineItem;
use crate::error::EngineError;
use crate::movement::{MovementLedger, TransactionReference};
use crate::stock::StockStore;

/// One line of a purchase: product, positive quantity, and the cost paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// The product being received.
    pub product_id: ProductId,
    /// Units received; must be strictly positive.
    pub quantity: i64,
    /// Cost per unit paid to the supplier; becomes the product's stored
    /// unit cost (last-cost policy). Must not be negative.
    pub unit_cost: Decimal,
}

/// Result of a committed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// The purchase transaction id, referenced by each created movement.
    pub purchase_id: PurchaseId,
    /// The supplier the goods were received from.
    pub supplier_id: SupplierId,
    /// One movement per line, in line order.
    pub movement_ids: Vec<MovementId>,
}

impl<C, S, L> Operations<C, S, L>
where
    C: Catalog,
    S: StockStore,
    L: MovementLedger,
{
    /// Processes a purchase: every line's stock is increased and its
    /// stored unit cost refreshed to the supplied cost, atomically.
    ///
    /// # Errors
    ///
    /// [`EngineError::NonPositiveQuantity`] or
    /// [`EngineError::NegativeUnitCost`] for malformed lines, plus the
    /// coordinator's batch errors.
    pub async fn purchase(
        &self,
        supplier_id: SupplierId,
        lines: Vec<PurchaseLine>,
    ) -> Result<PurchaseReceipt, EngineError> {
        if lines.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.quantity <= 0 {
                return Err(EngineError::NonPositiveQuantity(line.product_id));
            }
            if line.unit_cost.is_sign_negative() && !line.unit_cost.is_zero() {
                return Err(EngineError::NegativeUnitCost(line.product_id));
            }
            items.push(LineItem::inflow_with_cost(
                line.product_id,
                line.quantity,
                line.unit_cost,
            ));
        }

        let purchase_id = PurchaseId::new();
        let movement_ids = self
            .coordinator
            .submit(TransactionReference::purchase(purchase_id), items)
            .await?;

        info!(
            %purchase_id,
            %supplier_id,
            lines = movement_ids.len(),
            "purchase committed"
        );
        Ok(PurchaseReceipt {
            purchase_id,
            supplier_id,
            movement_ids,
        })
    }
}
