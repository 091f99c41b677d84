//! Concurrent in-memory catalog, stock store, and movement ledger.

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;

use kardex_core::catalog::Catalog;
use kardex_core::error::EngineError;
use kardex_core::movement::{Movement, MovementLedger, NewMovement};
use kardex_core::stock::{StockLevel, StockStore};
use kardex_shared::types::{MovementId, PageRequest, PageResponse, ProductId};

/// Seed data for one catalog product.
#[derive(Debug, Clone)]
pub struct ProductSeed {
    /// Display name (catalog-owned, carried for the demo/tests only).
    pub name: String,
    /// Current selling price.
    pub unit_price: Decimal,
    /// Opening stock quantity.
    pub initial_stock: i64,
    /// Opening unit cost.
    pub unit_cost: Decimal,
    /// Advisory reorder threshold; never enforced by the engine.
    pub min_stock: i64,
}

#[derive(Debug, Clone)]
struct ProductRecord {
    name: String,
    unit_price: Decimal,
    min_stock: i64,
    level: StockLevel,
}

/// In-memory catalog + stock store.
///
/// A `DashMap` gives shard-level interior mutability; serialization of
/// read-modify-write sequences per product is the coordinator's job, so
/// the store itself stays a thin persistence boundary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: DashMap<ProductId, ProductRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a catalog product with opening stock. This models the
    /// catalog service's create path, which is outside the engine.
    pub fn insert_product(&self, product_id: ProductId, seed: ProductSeed) {
        self.products.insert(
            product_id,
            ProductRecord {
                name: seed.name,
                unit_price: seed.unit_price,
                min_stock: seed.min_stock,
                level: StockLevel {
                    on_hand: seed.initial_stock,
                    unit_cost: seed.unit_cost,
                },
            },
        );
    }

    /// Returns the product's display name, if it exists.
    #[must_use]
    pub fn product_name(&self, product_id: ProductId) -> Option<String> {
        self.products.get(&product_id).map(|r| r.name.clone())
    }

    /// Returns the advisory minimum-stock threshold, if the product exists.
    #[must_use]
    pub fn min_stock(&self, product_id: ProductId) -> Option<i64> {
        self.products.get(&product_id).map(|r| r.min_stock)
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn product_exists(&self, product_id: ProductId) -> Result<bool, EngineError> {
        Ok(self.products.contains_key(&product_id))
    }

    async fn unit_price(&self, product_id: ProductId) -> Result<Decimal, EngineError> {
        self.products
            .get(&product_id)
            .map(|record| record.unit_price)
            .ok_or(EngineError::ProductNotFound(product_id))
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockLevel, EngineError> {
        self.products
            .get(&product_id)
            .map(|record| record.level)
            .ok_or(EngineError::ProductNotFound(product_id))
    }

    async fn set_stock(
        &self,
        product_id: ProductId,
        new_on_hand: i64,
        new_unit_cost: Option<Decimal>,
    ) -> Result<(), EngineError> {
        let mut record = self
            .products
            .get_mut(&product_id)
            .ok_or(EngineError::ProductNotFound(product_id))?;
        record.level.on_hand = new_on_hand;
        if let Some(cost) = new_unit_cost {
            record.level.unit_cost = cost;
        }
        debug!(%product_id, on_hand = new_on_hand, "stock written");
        Ok(())
    }
}

/// In-memory append-only movement ledger.
///
/// The only write path is `append`; no update or delete exists, so
/// committed movements are immutable by construction. Per-product vectors
/// hold movements in commit order; reads reverse that for newest-first.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    movements: DashMap<ProductId, Vec<Movement>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total movements recorded for a product.
    #[must_use]
    pub fn movement_count(&self, product_id: ProductId) -> usize {
        self.movements.get(&product_id).map_or(0, |v| v.len())
    }

    /// Sum of committed deltas for a product, for reconciliation checks.
    #[must_use]
    pub fn delta_sum(&self, product_id: ProductId) -> i64 {
        self.movements
            .get(&product_id)
            .map_or(0, |v| v.iter().map(|m| m.delta).sum())
    }
}

#[async_trait]
impl MovementLedger for MemoryLedger {
    async fn append(&self, movement: NewMovement) -> Result<MovementId, EngineError> {
        let id = MovementId::new();
        self.movements
            .entry(movement.product_id)
            .or_default()
            .push(movement.into_movement(id));
        Ok(id)
    }

    async fn list_by_product(
        &self,
        product_id: ProductId,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, EngineError> {
        let newest_first: Vec<Movement> = self
            .movements
            .get(&product_id)
            .map(|v| v.iter().rev().cloned().collect())
            .unwrap_or_default();

        let total = newest_first.len() as u64;
        let data = newest_first
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}
