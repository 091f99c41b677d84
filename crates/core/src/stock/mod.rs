//! Stock store: the single source of truth for current on-hand quantity.
//!
//! The store is a thin persistence boundary with no validation logic of
//! its own; all business rules live in the coordinator and the operation
//! façades, so alternate backing stores can be substituted freely.

pub mod store;

pub use store::{StockLevel, StockStore};
