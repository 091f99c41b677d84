//! Pure batch validation.
//!
//! Step 1 of the commit path: reject malformed batches outright, before
//! any lock is taken or any store read happens. This function has no side
//! effects, so a rejection here is trivially all-or-nothing.

use std::collections::BTreeSet;

use kardex_shared::types::ProductId;

use super::types::LineItem;
use crate::error::EngineError;

/// A batch that passed shape validation.
#[derive(Debug, Clone)]
pub struct ValidatedBatch {
    /// The line items, in caller order.
    pub lines: Vec<LineItem>,
    /// Distinct product ids sorted ascending. This is the lock
    /// acquisition order; every transaction uses the same relative order,
    /// which is the deadlock-avoidance rule.
    pub ordered_products: Vec<ProductId>,
}

/// Validates batch shape: non-empty, no duplicate products, no zero
/// deltas, no negative cost updates.
///
/// # Errors
///
/// Returns the first violation found; nothing has been locked or written.
pub fn validate_batch(lines: Vec<LineItem>) -> Result<ValidatedBatch, EngineError> {
    if lines.is_empty() {
        return Err(EngineError::EmptyBatch);
    }

    let mut seen = BTreeSet::new();
    for line in &lines {
        if line.delta == 0 {
            return Err(EngineError::ZeroDelta(line.product_id));
        }
        if let Some(cost) = line.new_unit_cost
            && cost.is_sign_negative()
            && !cost.is_zero()
        {
            return Err(EngineError::NegativeUnitCost(line.product_id));
        }
        if !seen.insert(line.product_id) {
            return Err(EngineError::DuplicateProduct(line.product_id));
        }
    }

    // BTreeSet iteration yields ascending order.
    let ordered_products = seen.into_iter().collect();

    Ok(ValidatedBatch {
        lines,
        ordered_products,
    })
}
