//! Core stock engine for Kardex.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and the transactional
//! commit path live here.
//!
//! # Modules
//!
//! - `catalog` - Read contract for the external product catalog
//! - `stock` - Stock store contract (current on-hand quantity and cost)
//! - `movement` - Append-only movement ledger contract and types
//! - `coordinator` - Atomic multi-line transaction coordinator and locks
//! - `ops` - Sale / Purchase / Adjustment operation façades
//! - `error` - Engine error taxonomy

pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod movement;
pub mod ops;
pub mod stock;

pub use catalog::Catalog;
pub use coordinator::TransactionCoordinator;
pub use error::EngineError;
pub use movement::{Movement, MovementKind, MovementLedger, NewMovement, TransactionReference};
pub use ops::Operations;
pub use stock::{StockLevel, StockStore};
