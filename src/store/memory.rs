use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::catalog::{MenuItem, MenuSortKey, MenuUpdate};
use crate::domain::order::{Order, OrderState};
use crate::domain::review::Review;
use super::{CatalogStore, OrderStore, ReviewStore, StoreError};

// ============================================================================
// In-Memory Stores
// ============================================================================
//
// Each operation holds the collection lock for its whole duration, which
// gives the single-document atomicity the store contracts promise.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<HashMap<String, MenuItem>>,
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.items.read().await.get(name).cloned())
    }

    async fn insert(&self, item: MenuItem) -> Result<(), StoreError> {
        self.items.write().await.insert(item.name.clone(), item);
        Ok(())
    }

    async fn update_fields(&self, name: &str, update: MenuUpdate) -> Result<u64, StoreError> {
        match self.items.write().await.get_mut(name) {
            Some(item) => {
                item.apply(update);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        Ok(self.items.write().await.remove(name).map_or(0, |_| 1))
    }

    async fn list_all(&self, sort_key: MenuSortKey) -> Result<Vec<MenuItem>, StoreError> {
        let mut items: Vec<MenuItem> = self.items.read().await.values().cloned().collect();
        sort_key.sort(&mut items);
        Ok(items)
    }
}

/// Append-only order history
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

/// Index of the most recent order for `menu_name`; insertion order breaks
/// timestamp ties.
fn latest_index(orders: &[Order], menu_name: &str) -> Option<usize> {
    orders
        .iter()
        .enumerate()
        .filter(|(_, order)| order.menu_name == menu_name)
        .max_by_key(|(index, order)| (order.placed_at, *index))
        .map(|(index, _)| index)
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_latest_by_menu_name(&self, menu_name: &str) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(latest_index(&orders, menu_name).map(|index| orders[index].clone()))
    }

    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn update_menu_name(&self, menu_name: &str, new_menu_name: &str) -> Result<u64, StoreError> {
        let mut orders = self.orders.write().await;
        match latest_index(&orders, menu_name) {
            Some(index) => {
                orders[index].menu_name = new_menu_name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_state(&self, menu_name: &str, state: &OrderState) -> Result<u64, StoreError> {
        let mut orders = self.orders.write().await;
        match latest_index(&orders, menu_name) {
            Some(index) => {
                orders[index].state = state.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        let mut indexed: Vec<(usize, &Order)> = orders.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.placed_at.cmp(&a.placed_at).then(ib.cmp(ia)));
        Ok(indexed.into_iter().map(|(_, order)| order.clone()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn find_by_menu_name(&self, menu_name: &str) -> Result<Option<Review>, StoreError> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .find(|review| review.menu_name == menu_name)
            .cloned())
    }

    async fn insert(&self, review: Review) -> Result<(), StoreError> {
        self.reviews.write().await.push(review);
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
