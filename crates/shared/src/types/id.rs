//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `SupplierId` where a
//! `ProductId` is expected. IDs are UUIDv7 so they carry a time component,
//! and they are `Ord`: the transaction coordinator relies on the total
//! order over `ProductId` for its deterministic lock-acquisition sequence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(ProductId, "Unique identifier for a stock-tracked product.");
typed_id!(MovementId, "Unique identifier for a ledger movement.");
typed_id!(SaleId, "Unique identifier for a sale transaction.");
typed_id!(PurchaseId, "Unique identifier for a purchase transaction.");
typed_id!(
    AdjustmentId,
    "Unique identifier for a stock adjustment transaction."
);
typed_id!(CustomerId, "Unique identifier for a customer reference.");
typed_id!(SupplierId, "Unique identifier for a supplier reference.");
