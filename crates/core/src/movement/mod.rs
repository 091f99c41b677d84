//! Append-only movement ledger ("kardex").
//!
//! Every committed stock change produces exactly one movement carrying the
//! balance before and after the write. Movements are never updated or
//! deleted; the contract exposes no mutation path, so the append-only
//! guarantee holds structurally rather than by convention.

pub mod ledger;
pub mod types;

pub use ledger::MovementLedger;
pub use types::{Movement, MovementKind, NewMovement, TransactionReference};
