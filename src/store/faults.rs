//! Store doubles for engine tests: call recording, outages and stalls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::catalog::{MenuItem, MenuSortKey, MenuUpdate};
use crate::domain::order::{Order, OrderState};
use crate::domain::review::Review;
use super::{CatalogStore, OrderStore, ReviewStore, StoreError};

/// Wraps a store and counts reads and writes that reach it
#[derive(Default)]
pub struct Recording<S> {
    inner: S,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl<S> Recording<S> {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) -> &S {
        self.reads.fetch_add(1, Ordering::SeqCst);
        &self.inner
    }

    fn write(&self) -> &S {
        self.writes.fetch_add(1, Ordering::SeqCst);
        &self.inner
    }
}

#[async_trait]
impl<S: CatalogStore> CatalogStore for Recording<S> {
    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, StoreError> {
        self.read().find_by_name(name).await
    }

    async fn insert(&self, item: MenuItem) -> Result<(), StoreError> {
        self.write().insert(item).await
    }

    async fn update_fields(&self, name: &str, update: MenuUpdate) -> Result<u64, StoreError> {
        self.write().update_fields(name, update).await
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        self.write().delete_by_name(name).await
    }

    async fn list_all(&self, sort_key: MenuSortKey) -> Result<Vec<MenuItem>, StoreError> {
        self.read().list_all(sort_key).await
    }
}

#[async_trait]
impl<S: OrderStore> OrderStore for Recording<S> {
    async fn find_latest_by_menu_name(&self, menu_name: &str) -> Result<Option<Order>, StoreError> {
        self.read().find_latest_by_menu_name(menu_name).await
    }

    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.write().insert(order).await
    }

    async fn update_menu_name(&self, menu_name: &str, new_menu_name: &str) -> Result<u64, StoreError> {
        self.write().update_menu_name(menu_name, new_menu_name).await
    }

    async fn update_state(&self, menu_name: &str, state: &OrderState) -> Result<u64, StoreError> {
        self.write().update_state(menu_name, state).await
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        self.read().list_all().await
    }
}

#[async_trait]
impl<S: ReviewStore> ReviewStore for Recording<S> {
    async fn find_by_menu_name(&self, menu_name: &str) -> Result<Option<Review>, StoreError> {
        self.read().find_by_menu_name(menu_name).await
    }

    async fn insert(&self, review: Review) -> Result<(), StoreError> {
        self.write().insert(review).await
    }
}

/// Every call fails as if the database were unreachable
pub struct Unavailable;

fn refused() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("connection refused"))
}

#[async_trait]
impl OrderStore for Unavailable {
    async fn find_latest_by_menu_name(&self, _: &str) -> Result<Option<Order>, StoreError> {
        Err(refused())
    }

    async fn insert(&self, _: Order) -> Result<(), StoreError> {
        Err(refused())
    }

    async fn update_menu_name(&self, _: &str, _: &str) -> Result<u64, StoreError> {
        Err(refused())
    }

    async fn update_state(&self, _: &str, _: &OrderState) -> Result<u64, StoreError> {
        Err(refused())
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        Err(refused())
    }
}

/// Every call hangs forever
pub struct Stalled;

#[async_trait]
impl CatalogStore for Stalled {
    async fn find_by_name(&self, _: &str) -> Result<Option<MenuItem>, StoreError> {
        std::future::pending().await
    }

    async fn insert(&self, _: MenuItem) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn update_fields(&self, _: &str, _: MenuUpdate) -> Result<u64, StoreError> {
        std::future::pending().await
    }

    async fn delete_by_name(&self, _: &str) -> Result<u64, StoreError> {
        std::future::pending().await
    }

    async fn list_all(&self, _: MenuSortKey) -> Result<Vec<MenuItem>, StoreError> {
        std::future::pending().await
    }
}
