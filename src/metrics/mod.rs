// Private module declaration
mod server;

use crate::domain::order::OrderState;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Engine operations (count by outcome, latency)
// - Soft rejections of menu changes
// - Store failures and deadline expiries
// - Orders placed
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub operations_total: IntCounterVec,
    pub operation_duration: HistogramVec,
    pub soft_rejections_total: IntCounterVec,
    pub store_errors_total: IntCounterVec,
    pub orders_placed_total: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations_total = IntCounterVec::new(
            Opts::new("engine_operations_total", "Total engine operations by outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new("engine_operation_duration_seconds", "Engine operation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        let soft_rejections_total = IntCounterVec::new(
            Opts::new("engine_soft_rejections_total", "Menu changes refused because of order state"),
            &["operation", "state"],
        )?;
        registry.register(Box::new(soft_rejections_total.clone()))?;

        let store_errors_total = IntCounterVec::new(
            Opts::new("store_errors_total", "Store calls that failed or hit their deadline"),
            &["operation"],
        )?;
        registry.register(Box::new(store_errors_total.clone()))?;

        let orders_placed_total = IntCounter::new("orders_placed_total", "Total orders inserted")?;
        registry.register(Box::new(orders_placed_total.clone()))?;

        Ok(Self {
            registry,
            operations_total,
            operation_duration,
            soft_rejections_total,
            store_errors_total,
            orders_placed_total,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_operation(&self, operation: &str, outcome: &str, duration_secs: f64) {
        self.operations_total.with_label_values(&[operation, outcome]).inc();
        self.operation_duration.with_label_values(&[operation]).observe(duration_secs);
    }

    pub fn record_soft_rejection(&self, operation: &str, state: &OrderState) {
        self.soft_rejections_total.with_label_values(&[operation, state.label()]).inc();
    }

    pub fn record_store_error(&self, operation: &str) {
        self.store_errors_total.with_label_values(&[operation]).inc();
    }

    pub fn record_order_placed(&self) {
        self.orders_placed_total.inc();
    }
}
