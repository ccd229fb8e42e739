// ============================================================================
// Store Layer - persistence contracts consumed by the engine
// ============================================================================
//
// The engine only sees the three traits below. Each call is an atomic
// single-document operation; nothing spans documents, so a lookup followed
// by a write is last-write-wins under concurrency.
//
// Implementations:
// - memory  - process-local, used for development and tests
// - scylla  - ScyllaDB tables with secondary indexes on menu_name
//
// ============================================================================

mod memory;
mod scylla;

#[cfg(test)]
pub(crate) mod faults;

pub use memory::{InMemoryCatalogStore, InMemoryOrderStore, InMemoryReviewStore};
pub use scylla::{ScyllaSettings, ScyllaStores};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::catalog::{MenuItem, MenuSortKey, MenuUpdate};
use crate::domain::order::{Order, OrderState};
use crate::domain::review::Review;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{operation} exceeded its {timeout:?} deadline")]
    DeadlineExceeded {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, StoreError>;

    /// Upserts on name
    async fn insert(&self, item: MenuItem) -> Result<(), StoreError>;

    /// Returns the number of items updated
    async fn update_fields(&self, name: &str, update: MenuUpdate) -> Result<u64, StoreError>;

    /// Returns the number of items deleted
    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError>;

    /// All items, descending by `sort_key`
    async fn list_all(&self, sort_key: MenuSortKey) -> Result<Vec<MenuItem>, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_latest_by_menu_name(&self, menu_name: &str) -> Result<Option<Order>, StoreError>;

    async fn insert(&self, order: Order) -> Result<(), StoreError>;

    /// Renames the most recent order for `menu_name`; returns the number updated
    async fn update_menu_name(&self, menu_name: &str, new_menu_name: &str) -> Result<u64, StoreError>;

    /// Sets the state of the most recent order for `menu_name`; returns the number updated
    async fn update_state(&self, menu_name: &str, state: &OrderState) -> Result<u64, StoreError>;

    /// All orders, most recent first
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// First stored review for `menu_name`
    async fn find_by_menu_name(&self, menu_name: &str) -> Result<Option<Review>, StoreError>;

    async fn insert(&self, review: Review) -> Result<(), StoreError>;
}

/// The long-lived store handles shared by every request
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
    pub reviews: Arc<dyn ReviewStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalogStore::default()),
            orders: Arc::new(InMemoryOrderStore::default()),
            reviews: Arc::new(InMemoryReviewStore::default()),
        }
    }
}
