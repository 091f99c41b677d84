//! Movement ledger domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kardex_shared::types::{AdjustmentId, MovementId, ProductId, PurchaseId, SaleId};

/// The business operation that produced a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock outflow from a sale.
    Sale,
    /// Stock inflow from a purchase (also refreshes unit cost).
    Purchase,
    /// Signed manual correction (breakage, recount, ...).
    Adjustment,
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Purchase => write!(f, "purchase"),
            Self::Adjustment => write!(f, "adjustment"),
        }
    }
}

/// Link from a movement back to the transaction that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReference {
    /// The kind of originating transaction.
    pub kind: MovementKind,
    /// The originating transaction's id.
    pub id: Uuid,
}

impl TransactionReference {
    /// Reference to a sale transaction.
    #[must_use]
    pub const fn sale(id: SaleId) -> Self {
        Self {
            kind: MovementKind::Sale,
            id: id.into_inner(),
        }
    }

    /// Reference to a purchase transaction.
    #[must_use]
    pub const fn purchase(id: PurchaseId) -> Self {
        Self {
            kind: MovementKind::Purchase,
            id: id.into_inner(),
        }
    }

    /// Reference to an adjustment transaction.
    #[must_use]
    pub const fn adjustment(id: AdjustmentId) -> Self {
        Self {
            kind: MovementKind::Adjustment,
            id: id.into_inner(),
        }
    }
}

/// A committed, immutable ledger entry.
///
/// `balance_before` and `balance_after` bracket the stock store's value
/// immediately around the write that this movement records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Ledger-assigned movement id (UUIDv7, time-ordered).
    pub id: MovementId,
    /// The product whose balance changed.
    pub product_id: ProductId,
    /// When the owning transaction committed. All movements of one
    /// transaction share the same timestamp.
    pub occurred_at: DateTime<Utc>,
    /// The business operation that produced this movement.
    pub kind: MovementKind,
    /// Signed quantity change; negative for outflow. Never zero.
    pub delta: i64,
    /// On-hand quantity immediately before the write.
    pub balance_before: i64,
    /// On-hand quantity immediately after the write.
    pub balance_after: i64,
    /// Link to the originating sale/purchase/adjustment.
    pub reference: TransactionReference,
    /// Optional free-text note (e.g. adjustment reason).
    pub note: Option<String>,
}

/// A movement about to be appended, before the ledger assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    /// The product whose balance changed.
    pub product_id: ProductId,
    /// Commit timestamp of the owning transaction.
    pub occurred_at: DateTime<Utc>,
    /// The business operation that produced this movement.
    pub kind: MovementKind,
    /// Signed quantity change; negative for outflow.
    pub delta: i64,
    /// On-hand quantity immediately before the write.
    pub balance_before: i64,
    /// On-hand quantity immediately after the write.
    pub balance_after: i64,
    /// Link to the originating transaction.
    pub reference: TransactionReference,
    /// Optional free-text note.
    pub note: Option<String>,
}

impl NewMovement {
    /// Finalizes this record into a [`Movement`] with a ledger-assigned id.
    #[must_use]
    pub fn into_movement(self, id: MovementId) -> Movement {
        Movement {
            id,
            product_id: self.product_id,
            occurred_at: self.occurred_at,
            kind: self.kind,
            delta: self.delta,
            balance_before: self.balance_before,
            balance_after: self.balance_after,
            reference: self.reference,
            note: self.note,
        }
    }

    /// Returns true if the before/after balances bracket the delta exactly.
    #[must_use]
    pub const fn brackets_delta(&self) -> bool {
        self.balance_before + self.delta == self.balance_after
    }
}
