//! Engine error taxonomy.
//!
//! Every error here is all-or-nothing at the transaction boundary: a batch
//! that fails with any of these has produced zero stock writes and zero
//! ledger appends.

use kardex_shared::AppError;
use kardex_shared::types::ProductId;
use thiserror::Error;

/// Errors that can occur while applying stock transactions.
#[derive(Debug, Error)]
pub enum EngineError {
    // ========== Lookup Errors ==========
    /// Referenced product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    // ========== Business Rule Errors ==========
    /// A sale or adjustment would drive a balance negative.
    #[error(
        "Insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The product whose balance would go negative.
        product_id: ProductId,
        /// The outflow quantity that was requested.
        requested: i64,
        /// The quantity actually on hand.
        available: i64,
    },

    // ========== Validation Errors ==========
    /// A transaction must contain at least one line item.
    #[error("Transaction batch is empty")]
    EmptyBatch,

    /// A product may appear at most once per batch.
    #[error("Product {0} appears more than once in the batch")]
    DuplicateProduct(ProductId),

    /// A line delta of zero is meaningless and rejected outright.
    #[error("Zero delta for product {0}")]
    ZeroDelta(ProductId),

    /// Sale and purchase quantities must be strictly positive.
    #[error("Quantity must be positive for product {0}")]
    NonPositiveQuantity(ProductId),

    /// A purchase unit cost must not be negative.
    #[error("Unit cost must not be negative for product {0}")]
    NegativeUnitCost(ProductId),

    /// Applying the delta would overflow the stock counter.
    #[error("Stock counter overflow for product {0}")]
    StockOverflow(ProductId),

    // ========== Concurrency Errors ==========
    /// Lock contention exceeded the configured wait bound. Nothing was
    /// written; the whole transaction is safe to retry.
    #[error("Could not acquire product locks within {waited_ms}ms, please retry")]
    Busy {
        /// How long the transaction waited before giving up.
        waited_ms: u64,
    },

    // ========== Storage Errors ==========
    /// Underlying durability failure during the commit step.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EngineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::DuplicateProduct(_) => "DUPLICATE_PRODUCT",
            Self::ZeroDelta(_) => "ZERO_DELTA",
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
            Self::StockOverflow(_) => "STOCK_OVERFLOW",
            Self::Busy { .. } => "BUSY",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed batch
            Self::EmptyBatch
            | Self::DuplicateProduct(_)
            | Self::ZeroDelta(_)
            | Self::NonPositiveQuantity(_)
            | Self::NegativeUnitCost(_)
            | Self::StockOverflow(_) => 400,

            // 404 Not Found
            Self::ProductNotFound(_) => 404,

            // 422 Unprocessable - business rule violation
            Self::InsufficientStock { .. } => 422,

            // 503 Service Unavailable - lock contention, retryable
            Self::Busy { .. } => 503,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }

    /// Returns true if the whole transaction may be retried as-is.
    ///
    /// Busy and storage errors guarantee nothing was written; validation
    /// and business-rule errors need caller intervention first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. } | Self::Storage(_))
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match &err {
            EngineError::ProductNotFound(_) => Self::NotFound(err.to_string()),
            EngineError::InsufficientStock { .. } => Self::BusinessRule(err.to_string()),
            EngineError::EmptyBatch
            | EngineError::DuplicateProduct(_)
            | EngineError::ZeroDelta(_)
            | EngineError::NonPositiveQuantity(_)
            | EngineError::NegativeUnitCost(_)
            | EngineError::StockOverflow(_) => Self::Validation(err.to_string()),
            EngineError::Busy { .. } => Self::Busy(err.to_string()),
            EngineError::Storage(_) => Self::Storage(err.to_string()),
        }
    }
}
