//! Transaction batch types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kardex_shared::types::ProductId;

/// One line of a stock transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product to mutate.
    pub product_id: ProductId,
    /// Signed quantity change; negative for outflow. Must not be zero.
    pub delta: i64,
    /// New unit cost to store alongside the quantity. Purchases set this
    /// (last-cost policy); sales and adjustments leave it `None`.
    pub new_unit_cost: Option<Decimal>,
    /// Optional note carried onto the resulting movement.
    pub note: Option<String>,
}

impl LineItem {
    /// A plain signed line with no cost update and no note.
    #[must_use]
    pub const fn new(product_id: ProductId, delta: i64) -> Self {
        Self {
            product_id,
            delta,
            new_unit_cost: None,
            note: None,
        }
    }

    /// An inflow line that also refreshes the stored unit cost.
    #[must_use]
    pub const fn inflow_with_cost(product_id: ProductId, quantity: i64, unit_cost: Decimal) -> Self {
        Self {
            product_id,
            delta: quantity,
            new_unit_cost: Some(unit_cost),
            note: None,
        }
    }

    /// Attaches a note to this line.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
