//! Property-based tests for batch validation.
//!
//! Properties:
//! - A batch accepted by validation has no duplicates and no zero deltas
//! - The lock order is sorted ascending and covers every line exactly once
//! - Validation never reorders or rewrites the line items themselves

use proptest::prelude::*;

use kardex_shared::types::ProductId;

use super::types::LineItem;
use super::validation::validate_batch;
use crate::error::EngineError;

/// Strategy for a non-zero signed delta within a realistic range.
fn nonzero_delta() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..=10_000, -10_000i64..=-1]
}

/// Strategy for a batch of lines over a small product pool, which makes
/// duplicate product ids likely.
fn arbitrary_lines() -> impl Strategy<Value = Vec<LineItem>> {
    let pool: Vec<ProductId> = (0..8).map(|_| ProductId::new()).collect();
    prop::collection::vec((0usize..8, nonzero_delta()), 0..12).prop_map(move |pairs| {
        pairs
            .into_iter()
            .map(|(idx, delta)| LineItem::new(pool[idx], delta))
            .collect()
    })
}

/// Strategy for a batch guaranteed valid: distinct products, non-zero deltas.
fn valid_lines() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(nonzero_delta(), 1..10).prop_map(|deltas| {
        deltas
            .into_iter()
            .map(|delta| LineItem::new(ProductId::new(), delta))
            .collect()
    })
}

proptest! {
    #[test]
    fn accepted_batches_are_well_formed(lines in arbitrary_lines()) {
        if let Ok(batch) = validate_batch(lines) {
            // No zero deltas survived.
            prop_assert!(batch.lines.iter().all(|l| l.delta != 0));

            // Lock order is strictly ascending (therefore duplicate-free).
            prop_assert!(batch.ordered_products.windows(2).all(|w| w[0] < w[1]));

            // Lock order covers exactly the batch's products.
            prop_assert_eq!(batch.ordered_products.len(), batch.lines.len());
            for line in &batch.lines {
                prop_assert!(batch.ordered_products.contains(&line.product_id));
            }
        }
    }

    #[test]
    fn valid_batches_always_accepted(lines in valid_lines()) {
        let expected: Vec<LineItem> = lines.clone();
        let batch = validate_batch(lines);
        prop_assert!(batch.is_ok());
        // Line items pass through untouched, in caller order.
        prop_assert_eq!(batch.unwrap().lines, expected);
    }

    #[test]
    fn duplicate_product_always_rejected(delta_a in nonzero_delta(), delta_b in nonzero_delta()) {
        let product = ProductId::new();
        let result = validate_batch(vec![
            LineItem::new(product, delta_a),
            LineItem::new(product, delta_b),
        ]);
        prop_assert!(matches!(result, Err(EngineError::DuplicateProduct(p)) if p == product));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use proptest::strategy::ValueTree;

    #[test]
    fn test_strategies_produce_usable_batches() {
        // Smoke test: the valid-lines strategy really is valid.
        let mut runner = proptest::test_runner::TestRunner::default();
        let lines = valid_lines()
            .new_tree(&mut runner)
            .unwrap()
            .current();
        assert!(validate_batch(lines).is_ok());
    }
}
