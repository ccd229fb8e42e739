use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::deserialize::row::DeserializeRow;
use scylla::serialize::row::SerializeRow;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::catalog::{MenuItem, MenuSortKey, MenuUpdate};
use crate::domain::order::{Order, OrderState};
use crate::domain::review::Review;
use crate::utils::{retry_with_backoff, RetryConfig};
use super::{CatalogStore, OrderStore, ReviewStore, StoreError, Stores};

// ============================================================================
// ScyllaDB Stores
// ============================================================================
//
// Tables:
// - menu_items  keyed by name
// - orders      keyed by a time-ordered uuid, secondary index on menu_name
// - reviews     keyed by a time-ordered uuid, secondary index on menu_name
//
// ScyllaDB does not report affected row counts and an UPDATE on a missing
// key would insert it, so update/delete first look the row up. The lookup
// and the write are separate statements: last write wins.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct ScyllaSettings {
    pub node: String,
    pub keyspace: String,
    pub connect_attempts: u32,
}

/// One session shared by all three stores
pub struct ScyllaStores {
    session: Arc<Session>,
}

impl ScyllaStores {
    /// Connect with exponential backoff and make sure the schema exists
    pub async fn connect(settings: &ScyllaSettings) -> anyhow::Result<Self> {
        let retry = RetryConfig {
            max_attempts: settings.connect_attempts.max(1),
            ..RetryConfig::default()
        };

        let session = retry_with_backoff(retry, |attempt| {
            let node = settings.node.clone();
            async move {
                tracing::info!(attempt, node = %node, "Connecting to ScyllaDB...");
                SessionBuilder::new().known_node(&node).build().await
            }
        })
        .await
        .with_context(|| format!("ScyllaDB unreachable at {}", settings.node))?;

        bootstrap_schema(&session, &settings.keyspace).await?;

        tracing::info!(keyspace = %settings.keyspace, "✅ ScyllaDB schema ready");

        Ok(Self {
            session: Arc::new(session),
        })
    }

    pub fn into_stores(self) -> Stores {
        Stores {
            catalog: Arc::new(ScyllaCatalogStore { session: self.session.clone() }),
            orders: Arc::new(ScyllaOrderStore { session: self.session.clone() }),
            reviews: Arc::new(ScyllaReviewStore { session: self.session }),
        }
    }
}

async fn bootstrap_schema(session: &Session, keyspace: &str) -> anyhow::Result<()> {
    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
            ),
            (),
        )
        .await?;

    session.use_keyspace(keyspace, false).await?;

    let statements = [
        "CREATE TABLE IF NOT EXISTS menu_items (
            name text PRIMARY KEY,
            price bigint,
            recommend_score bigint,
            rating bigint,
            released_at timestamp
        )",
        "CREATE TABLE IF NOT EXISTS orders (
            id uuid PRIMARY KEY,
            menu_name text,
            customer_phone text,
            address text,
            placed_at timestamp,
            state text,
            pending_menu_change text
        )",
        "CREATE INDEX IF NOT EXISTS orders_by_menu_name ON orders (menu_name)",
        "CREATE TABLE IF NOT EXISTS reviews (
            id uuid PRIMARY KEY,
            menu_name text,
            grade int,
            comment text,
            written_at timestamp
        )",
        "CREATE INDEX IF NOT EXISTS reviews_by_menu_name ON reviews (menu_name)",
    ];

    for statement in statements {
        session.query_unpaged(statement, ()).await?;
    }

    Ok(())
}

fn backend(err: impl Into<anyhow::Error>) -> StoreError {
    StoreError::Backend(err.into())
}

async fn select<R>(session: &Session, cql: &str, values: impl SerializeRow) -> Result<Vec<R>, StoreError>
where
    R: for<'frame, 'metadata> DeserializeRow<'frame, 'metadata>,
{
    let result = session.query_unpaged(cql, values).await.map_err(backend)?;

    // A SELECT always answers with a rows result, even an empty one
    let rows = result
        .into_rows_result()
        .map_err(backend)?
        .rows::<R>()
        .map_err(backend)?
        .collect::<Result<Vec<R>, _>>()
        .map_err(backend)?;

    tracing::debug!(cql, row_count = rows.len(), "Loaded rows");
    Ok(rows)
}

async fn execute(session: &Session, cql: &str, values: impl SerializeRow) -> Result<(), StoreError> {
    session.query_unpaged(cql, values).await.map_err(backend)?;
    Ok(())
}

// ============================================================================
// Catalog
// ============================================================================

type MenuRow = (String, i64, i64, i64, DateTime<Utc>);

const MENU_COLUMNS: &str = "SELECT name, price, recommend_score, rating, released_at FROM menu_items";

fn menu_from_row((name, price, recommend_score, rating, released_at): MenuRow) -> MenuItem {
    MenuItem {
        name,
        price,
        recommend_score,
        rating,
        released_at,
    }
}

pub struct ScyllaCatalogStore {
    session: Arc<Session>,
}

#[async_trait]
impl CatalogStore for ScyllaCatalogStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, StoreError> {
        let rows: Vec<MenuRow> = select(
            &self.session,
            &format!("{MENU_COLUMNS} WHERE name = ?"),
            (name,),
        )
        .await?;
        Ok(rows.into_iter().next().map(menu_from_row))
    }

    async fn insert(&self, item: MenuItem) -> Result<(), StoreError> {
        execute(
            &self.session,
            "INSERT INTO menu_items (name, price, recommend_score, rating, released_at) VALUES (?, ?, ?, ?, ?)",
            (item.name, item.price, item.recommend_score, item.rating, item.released_at),
        )
        .await
    }

    async fn update_fields(&self, name: &str, update: MenuUpdate) -> Result<u64, StoreError> {
        if self.find_by_name(name).await?.is_none() {
            return Ok(0);
        }

        execute(
            &self.session,
            "UPDATE menu_items SET price = ?, recommend_score = ? WHERE name = ?",
            (update.price, update.recommend_score, name),
        )
        .await?;
        Ok(1)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        if self.find_by_name(name).await?.is_none() {
            return Ok(0);
        }

        execute(&self.session, "DELETE FROM menu_items WHERE name = ?", (name,)).await?;
        Ok(1)
    }

    async fn list_all(&self, sort_key: MenuSortKey) -> Result<Vec<MenuItem>, StoreError> {
        let rows: Vec<MenuRow> = select(&self.session, MENU_COLUMNS, ()).await?;
        let mut items: Vec<MenuItem> = rows.into_iter().map(menu_from_row).collect();
        sort_key.sort(&mut items);
        Ok(items)
    }
}

// ============================================================================
// Orders
// ============================================================================

// Every column but the key may be NULL: an UPDATE on a missing id leaves a
// partial row behind. NULLs read back as zero values so the engine's blank
// record check sees them.
type OrderRow = (
    Uuid,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<DateTime<Utc>>,
    Option<String>,
    Option<String>,
);

const ORDER_COLUMNS: &str = "SELECT id, menu_name, customer_phone, address, placed_at, state, pending_menu_change FROM orders";

fn order_from_row(
    (id, menu_name, customer_phone, address, placed_at, state, pending_menu_change): OrderRow,
) -> Order {
    Order {
        id,
        menu_name: menu_name.unwrap_or_default(),
        customer_phone: customer_phone.unwrap_or_default(),
        address: address.unwrap_or_default(),
        placed_at: placed_at.unwrap_or_default(),
        state: OrderState::from(state.unwrap_or_default()),
        pending_menu_change,
    }
}

pub struct ScyllaOrderStore {
    session: Arc<Session>,
}

#[async_trait]
impl OrderStore for ScyllaOrderStore {
    async fn find_latest_by_menu_name(&self, menu_name: &str) -> Result<Option<Order>, StoreError> {
        let rows: Vec<OrderRow> = select(
            &self.session,
            &format!("{ORDER_COLUMNS} WHERE menu_name = ?"),
            (menu_name,),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(order_from_row)
            .max_by_key(|order| (order.placed_at, order.id)))
    }

    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        execute(
            &self.session,
            "INSERT INTO orders (id, menu_name, customer_phone, address, placed_at, state, pending_menu_change) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                order.id,
                order.menu_name.as_str(),
                order.customer_phone.as_str(),
                order.address.as_str(),
                order.placed_at,
                order.state.as_str(),
                order.pending_menu_change.as_deref(),
            ),
        )
        .await
    }

    async fn update_menu_name(&self, menu_name: &str, new_menu_name: &str) -> Result<u64, StoreError> {
        let Some(latest) = self.find_latest_by_menu_name(menu_name).await? else {
            return Ok(0);
        };

        execute(
            &self.session,
            "UPDATE orders SET menu_name = ? WHERE id = ?",
            (new_menu_name, latest.id),
        )
        .await?;
        Ok(1)
    }

    async fn update_state(&self, menu_name: &str, state: &OrderState) -> Result<u64, StoreError> {
        let Some(latest) = self.find_latest_by_menu_name(menu_name).await? else {
            return Ok(0);
        };

        execute(
            &self.session,
            "UPDATE orders SET state = ? WHERE id = ?",
            (state.as_str(), latest.id),
        )
        .await?;
        Ok(1)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> = select(&self.session, ORDER_COLUMNS, ()).await?;
        let mut orders: Vec<Order> = rows.into_iter().map(order_from_row).collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}

// ============================================================================
// Reviews
// ============================================================================

type ReviewRow = (String, i32, String, DateTime<Utc>);

pub struct ScyllaReviewStore {
    session: Arc<Session>,
}

#[async_trait]
impl ReviewStore for ScyllaReviewStore {
    async fn find_by_menu_name(&self, menu_name: &str) -> Result<Option<Review>, StoreError> {
        let rows: Vec<ReviewRow> = select(
            &self.session,
            "SELECT menu_name, grade, comment, written_at FROM reviews WHERE menu_name = ?",
            (menu_name,),
        )
        .await?;

        // Earliest written review is "the" review for the menu
        Ok(rows
            .into_iter()
            .min_by_key(|(_, _, _, written_at)| *written_at)
            .map(|(menu_name, grade, comment, _)| Review {
                menu_name,
                grade,
                comment,
            }))
    }

    async fn insert(&self, review: Review) -> Result<(), StoreError> {
        execute(
            &self.session,
            "INSERT INTO reviews (id, menu_name, grade, comment, written_at) VALUES (?, ?, ?, ?, ?)",
            (Uuid::now_v7(), review.menu_name, review.grade, review.comment, Utc::now()),
        )
        .await
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Statement execution needs a live cluster; these cover the row mapping.
//
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_row_mapping_keeps_unknown_state() {
        let id = Uuid::now_v7();
        let placed_at = Utc::now();
        let order = order_from_row((
            id,
            Some("Whopper".to_string()),
            Some("010".to_string()),
            Some("Seoul".to_string()),
            Some(placed_at),
            Some("EATEN".to_string()),
            None,
        ));

        assert_eq!(order.id, id);
        assert_eq!(order.placed_at, placed_at);
        assert_eq!(order.state, OrderState::Unrecognized("EATEN".to_string()));
    }

    #[test]
    fn test_order_row_mapping_reads_legacy_labels() {
        let order = order_from_row((
            Uuid::now_v7(),
            Some("Whopper".to_string()),
            None,
            Some("Seoul".to_string()),
            Some(Utc::now()),
            Some("조리중".to_string()),
            Some("Fries".to_string()),
        ));

        assert_eq!(order.state, OrderState::Cooking);
        assert_eq!(order.customer_phone, "");
        assert_eq!(order.pending_menu_change.as_deref(), Some("Fries"));
    }

    #[test]
    fn test_order_row_with_null_columns_is_blank() {
        let order = order_from_row((Uuid::now_v7(), None, None, None, None, None, None));

        assert!(order.is_blank());
        assert_eq!(order.placed_at, DateTime::<Utc>::default());
    }

    #[tokio::test]
    async fn test_null_order_rows_surface_as_integrity_anomaly() {
        use crate::engine::{EngineError, EngineSettings, OrderLifecycleEngine};
        use crate::store::InMemoryOrderStore;

        let orders = InMemoryOrderStore::default();
        orders
            .insert(order_from_row((Uuid::now_v7(), None, None, None, None, None, None)))
            .await
            .unwrap();

        let mut stores = Stores::in_memory();
        stores.orders = Arc::new(orders);
        let engine = OrderLifecycleEngine::new(stores, EngineSettings::default());

        let err = engine.list_orders().await.unwrap_err();
        assert!(matches!(err, EngineError::IntegrityAnomaly(_)));
    }

    #[test]
    fn test_menu_row_mapping() {
        let released_at = Utc::now();
        let item = menu_from_row(("Whopper".to_string(), 5000, 3, 0, released_at));
        assert_eq!(item.name, "Whopper");
        assert_eq!(item.price, 5000);
        assert_eq!(item.recommend_score, 3);
        assert_eq!(item.released_at, released_at);
    }
}
