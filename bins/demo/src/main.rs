//! Kardex demo walkthrough.
//!
//! Seeds a small catalog into the in-memory backend, then runs a
//! purchase, a multi-line sale, and a shrinkage adjustment, printing the
//! resulting stock levels and movement history after each step.
//!
//! Usage: cargo run --bin demo

use std::sync::Arc;

use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kardex_core::Operations;
use kardex_core::error::EngineError;
use kardex_core::ops::{AdjustmentLine, AdjustmentReason, PurchaseLine, SaleLine};
use kardex_shared::EngineConfig;
use kardex_shared::types::{CustomerId, ProductId, SupplierId};
use kardex_store::{MemoryLedger, MemoryStore, ProductSeed};

type Engine = Operations<MemoryStore, MemoryStore, MemoryLedger>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kardex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = EngineConfig::load()?;
    info!(
        lock_wait_ms = config.coordinator.lock_wait_ms,
        per_page = config.history.per_page,
        "Engine configured"
    );

    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(MemoryLedger::new());
    let engine = Engine::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&ledger),
        &config,
    );

    let widget = seed_product(&store, "Widget", dec!(19.99), 0, dec!(7.50));
    let gadget = seed_product(&store, "Gadget", dec!(49.99), 5, dec!(22.00));
    println!("Seeded catalog: Widget (empty), Gadget (5 on hand)");

    // Receive goods from a supplier.
    let receipt = engine
        .purchase(
            SupplierId::new(),
            vec![
                PurchaseLine {
                    product_id: widget,
                    quantity: 40,
                    unit_cost: dec!(7.20),
                },
                PurchaseLine {
                    product_id: gadget,
                    quantity: 10,
                    unit_cost: dec!(21.50),
                },
            ],
        )
        .await?;
    println!(
        "\nPurchase {} received ({} movements)",
        receipt.purchase_id,
        receipt.movement_ids.len()
    );
    print_levels(&engine, &store, &[widget, gadget]).await?;

    // Sell to a customer; prices come from the catalog, not the caller.
    let receipt = engine
        .sale(
            CustomerId::new(),
            vec![
                SaleLine {
                    product_id: widget,
                    quantity: 3,
                },
                SaleLine {
                    product_id: gadget,
                    quantity: 2,
                },
            ],
        )
        .await?;
    println!("\nSale {} committed, total {}", receipt.sale_id, receipt.total);
    print_levels(&engine, &store, &[widget, gadget]).await?;

    // An oversell is rejected atomically: neither line is written.
    let oversell = engine
        .sale(
            CustomerId::new(),
            vec![
                SaleLine {
                    product_id: gadget,
                    quantity: 1,
                },
                SaleLine {
                    product_id: widget,
                    quantity: 1_000,
                },
            ],
        )
        .await;
    match oversell {
        Err(EngineError::InsufficientStock {
            requested,
            available,
            ..
        }) => println!("\nOversell rejected: requested {requested}, available {available}"),
        other => anyhow::bail!("expected an insufficient-stock rejection, got {other:?}"),
    }

    // Record shrinkage found during a stocktake.
    let receipt = engine
        .adjust(
            AdjustmentReason::Breakage,
            vec![AdjustmentLine {
                product_id: widget,
                delta: -2,
                note: Some("dropped pallet".to_string()),
            }],
        )
        .await?;
    println!("\nAdjustment {} recorded", receipt.adjustment_id);
    print_levels(&engine, &store, &[widget, gadget]).await?;

    println!("\nWidget movement history (newest first):");
    let page = engine.recent_history(widget).await?;
    for movement in &page.data {
        let note = movement.note.as_deref().unwrap_or("-");
        println!(
            "  {} {:>10} {:>5} {:>4} -> {:<4} {}",
            movement.occurred_at.format("%H:%M:%S%.3f"),
            movement.kind.to_string(),
            movement.delta,
            movement.balance_before,
            movement.balance_after,
            note
        );
    }
    println!(
        "  {} of {} movements shown",
        page.data.len(),
        page.meta.total
    );

    Ok(())
}

fn seed_product(
    store: &MemoryStore,
    name: &str,
    unit_price: rust_decimal::Decimal,
    initial_stock: i64,
    unit_cost: rust_decimal::Decimal,
) -> ProductId {
    let product = ProductId::new();
    store.insert_product(
        product,
        ProductSeed {
            name: name.to_string(),
            unit_price,
            initial_stock,
            unit_cost,
            min_stock: 0,
        },
    );
    product
}

async fn print_levels(
    engine: &Engine,
    store: &MemoryStore,
    products: &[ProductId],
) -> anyhow::Result<()> {
    for &product in products {
        let level = engine.stock_level(product).await?;
        let name = store.product_name(product).unwrap_or_default();
        println!(
            "  {:<8} on_hand={:<4} unit_cost={}",
            name, level.on_hand, level.unit_cost
        );
    }
    Ok(())
}
