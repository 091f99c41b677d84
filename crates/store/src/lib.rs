//! In-memory backend for the Kardex stock engine.
//!
//! Implements the core contracts (`Catalog`, `StockStore`,
//! `MovementLedger`) over concurrent in-process maps. This is the
//! reference backend used by tests and the demo binary; a database-backed
//! store can be substituted without touching any business rule, since the
//! store contracts carry no validation logic.

pub mod memory;

pub use memory::{MemoryLedger, MemoryStore, ProductSeed};
