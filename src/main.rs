use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod engine;
mod http;
mod metrics;
mod store;
mod utils;

use config::{Config, StoreBackend};
use engine::OrderLifecycleEngine;
use store::{ScyllaStores, Stores};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,food_order=debug"))
        )
        .init();

    tracing::info!("🚀 Starting food order service");

    let config = Config::load()?;
    tracing::info!(
        store = %config.store_backend,
        validation_mode = %config.validation_mode,
        store_timeout_ms = config.store_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    // === 1. Stores ===
    let stores = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores, data is lost on restart");
            Stores::in_memory()
        }
        StoreBackend::Scylla => {
            tracing::info!(node = %config.scylla.node, keyspace = %config.scylla.keyspace, "Connecting to ScyllaDB...");
            ScyllaStores::connect(&config.scylla).await?.into_stores()
        }
    };

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Engine ===
    let engine = Arc::new(
        OrderLifecycleEngine::new(stores, config.engine_settings()).with_metrics(metrics.clone()),
    );

    // === 4. HTTP server ===
    tracing::info!(bind_addr = %config.bind_addr, "🌐 Serving customer and seller routes");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(engine.clone()))
            .app_data(web::Data::from(metrics.clone()))
            .configure(http::configure)
            .configure(metrics::configure)
    })
    .bind(config.bind_addr)?
    .run()
    .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
