//! Transaction coordinator: atomic multi-line stock mutations.
//!
//! This module implements the core commit path:
//! - Batch shape validation (pure, no side effects)
//! - Per-product lock table with deterministic acquisition order
//! - Read / compute / validate under held locks
//! - All-or-nothing write of stock levels and ledger movements

pub mod locks;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use locks::ProductLocks;
pub use service::TransactionCoordinator;
pub use types::LineItem;
pub use validation::{ValidatedBatch, validate_batch};
