//! Sale façade: multi-line stock outflow with frozen line prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use kardex_shared::types::{CustomerId, MovementId, ProductId, SaleId};

use super::Operations;
use crate::catalog::Catalog;
use crate::coordinator::LineItem;
use crate::error::EngineError;
use crate::movement::{MovementLedger, TransactionReference};
use crate::stock::StockStore;

/// One line of a sale: a product and a positive quantity to sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// The product being sold.
    pub product_id: ProductId,
    /// Units to sell; must be strictly positive.
    pub quantity: i64,
}

/// Result of a committed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// The sale transaction id, referenced by each created movement.
    pub sale_id: SaleId,
    /// The customer the sale was made to.
    pub customer_id: CustomerId,
    /// One movement per line, in line order.
    pub movement_ids: Vec<MovementId>,
    /// Sale total at the unit prices frozen when the sale committed.
    pub total: Decimal,
}

impl<C, S, L> Operations<C, S, L>
where
    C: Catalog,
    S: StockStore,
    L: MovementLedger,
{
    /// Processes a sale: every line's stock is decreased, or none is.
    ///
    /// Unit prices are re-read from the catalog here and frozen into the
    /// receipt total; price determination stays the catalog's concern.
    /// On insufficient stock the sale is rejected wholesale - partial
    /// fulfillment is not supported.
    ///
    /// # Errors
    ///
    /// [`EngineError::NonPositiveQuantity`] for a zero or negative
    /// quantity, [`EngineError::InsufficientStock`] if any line would
    /// drive a balance negative, plus the coordinator's batch errors.
    pub async fn sale(
        &self,
        customer_id: CustomerId,
        lines: Vec<SaleLine>,
    ) -> Result<SaleReceipt, EngineError> {
        if lines.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let mut total = Decimal::ZERO;
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            if line.quantity <= 0 {
                return Err(EngineError::NonPositiveQuantity(line.product_id));
            }
            let price = self.catalog.unit_price(line.product_id).await?;
            total += price * Decimal::from(line.quantity);
            items.push(LineItem::new(line.product_id, -line.quantity));
        }

        let sale_id = SaleId::new();
        let movement_ids = self
            .coordinator
            .submit(TransactionReference::sale(sale_id), items)
            .await?;

        info!(
            %sale_id,
            %customer_id,
            lines = movement_ids.len(),
            %total,
            "sale committed"
        );
        Ok(SaleReceipt {
            sale_id,
            customer_id,
            movement_ids,
            total,
        })
    }
}
