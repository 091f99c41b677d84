//! Adjustment façade: signed manual stock corrections with a reason code.

use serde::{Deserialize, Serialize};
use tracing::info;

use kardex_shared::types::{AdjustmentId, MovementId, ProductId};

use super::Operations;
use crate::catalog::Catalog;
use crate::coordinator::LineItem;
use crate::error::EngineError;
use crate::movement::{MovementLedger, TransactionReference};
use crate::stock::StockStore;

/// Why a manual stock correction was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Stock broken or spoiled.
    Breakage,
    /// Physical recount differed from the recorded balance.
    Recount,
    /// Correction of an earlier data-entry mistake.
    Correction,
    /// Anything else; details belong in the line note.
    Other,
}

impl std::fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakage => write!(f, "breakage"),
            Self::Recount => write!(f, "recount"),
            Self::Correction => write!(f, "correction"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// One line of an adjustment: a product and a signed correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    /// The product to correct.
    pub product_id: ProductId,
    /// Signed correction; negative to remove stock. Must not be zero.
    pub delta: i64,
    /// Optional detail appended to the reason in the movement note.
    pub note: Option<String>,
}

/// Result of a committed adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentReceipt {
    /// The adjustment transaction id, referenced by each movement.
    pub adjustment_id: AdjustmentId,
    /// The reason recorded on every movement of this adjustment.
    pub reason: AdjustmentReason,
    /// One movement per line, in line order.
    pub movement_ids: Vec<MovementId>,
}

impl<C, S, L> Operations<C, S, L>
where
    C: Catalog,
    S: StockStore,
    L: MovementLedger,
{
    /// Applies manual stock corrections, all lines or none.
    ///
    /// Deltas are signed; negative corrections are subject to the same
    /// non-negative-balance rule as sales. The reason (and any per-line
    /// note) is recorded on the resulting movements.
    ///
    /// # Errors
    ///
    /// The coordinator's batch errors, including
    /// [`EngineError::InsufficientStock`] for an over-large negative
    /// correction and [`EngineError::ZeroDelta`] for a zero line.
    pub async fn adjust(
        &self,
        reason: AdjustmentReason,
        lines: Vec<AdjustmentLine>,
    ) -> Result<AdjustmentReceipt, EngineError> {
        let items = lines
            .into_iter()
            .map(|line| {
                let note = match line.note {
                    Some(detail) => format!("{reason}: {detail}"),
                    None => reason.to_string(),
                };
                LineItem::new(line.product_id, line.delta).with_note(note)
            })
            .collect();

        let adjustment_id = AdjustmentId::new();
        let movement_ids = self
            .coordinator
            .submit(TransactionReference::adjustment(adjustment_id), items)
            .await?;

        info!(
            %adjustment_id,
            %reason,
            lines = movement_ids.len(),
            "adjustment committed"
        );
        Ok(AdjustmentReceipt {
            adjustment_id,
            reason,
            movement_ids,
        })
    }
}
