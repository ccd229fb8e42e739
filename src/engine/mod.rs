// ============================================================================
// Order Lifecycle Engine
// ============================================================================
//
// Orchestrates: Request → Rules → Store mutation → Outcome
//
// The engine owns no data. It holds the shared store handles and the rule
// evaluators, so one instance is shared by every request. Store calls are
// bounded by a deadline and never retried.
//
// ============================================================================

mod catalog;
mod errors;
mod orders;
mod outcome;
mod reviews;

#[cfg(test)]
mod test_support;

pub use errors::EngineError;
pub use outcome::OrderOutcome;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::catalog::CatalogRules;
use crate::domain::order::OrderRules;
use crate::domain::review::ReviewRules;
use crate::domain::ValidationMode;
use crate::metrics::Metrics;
use crate::store::{StoreError, Stores};

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub mode: ValidationMode,
    pub store_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Lenient,
            store_timeout: Duration::from_secs(2),
        }
    }
}

pub struct OrderLifecycleEngine {
    stores: Stores,
    order_rules: OrderRules,
    catalog_rules: CatalogRules,
    review_rules: ReviewRules,
    store_timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl OrderLifecycleEngine {
    pub fn new(stores: Stores, settings: EngineSettings) -> Self {
        Self {
            stores,
            order_rules: OrderRules::new(settings.mode),
            catalog_rules: CatalogRules::new(settings.mode),
            review_rules: ReviewRules::new(settings.mode),
            store_timeout: settings.store_timeout,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run one store call under the configured deadline
    async fn store_call<T, F>(&self, operation: &'static str, call: F) -> Result<T, EngineError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let result = match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::DeadlineExceeded {
                operation,
                timeout: self.store_timeout,
            }),
        };

        result.map_err(|err| {
            tracing::error!(operation, error = %err, "Store call failed");
            if let Some(metrics) = &self.metrics {
                metrics.record_store_error(operation);
            }
            EngineError::Store(err)
        })
    }

    /// Time an operation and record its outcome
    async fn observe<T, F>(&self, operation: &'static str, work: F) -> Result<T, EngineError>
    where
        F: Future<Output = Result<T, EngineError>>,
    {
        let started = Instant::now();
        let result = work.await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => {
                // Store failures were already logged at the call site
                if !matches!(err, EngineError::Store(_)) {
                    tracing::warn!(operation, kind = err.kind(), error = %err, "Request rejected");
                }
                err.kind()
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_operation(operation, outcome, started.elapsed().as_secs_f64());
        }

        result
    }
}
