//! Engine wired to recording in-memory stores, plus command builders.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::catalog::{MenuItem, RegisterMenu};
use crate::domain::order::{Order, OrderCommand};
use crate::domain::ValidationMode;
use crate::store::faults::Recording;
use crate::store::{InMemoryCatalogStore, InMemoryOrderStore, InMemoryReviewStore, Stores};
use super::{EngineSettings, OrderLifecycleEngine, OrderOutcome};

pub struct Harness {
    pub engine: OrderLifecycleEngine,
    pub catalog: Arc<Recording<InMemoryCatalogStore>>,
    pub orders: Arc<Recording<InMemoryOrderStore>>,
    pub reviews: Arc<Recording<InMemoryReviewStore>>,
}

impl Harness {
    pub fn new(mode: ValidationMode) -> Self {
        let catalog = Arc::new(Recording::<InMemoryCatalogStore>::default());
        let orders = Arc::new(Recording::<InMemoryOrderStore>::default());
        let reviews = Arc::new(Recording::<InMemoryReviewStore>::default());

        let stores = Stores {
            catalog: catalog.clone(),
            orders: orders.clone(),
            reviews: reviews.clone(),
        };
        let settings = EngineSettings {
            mode,
            store_timeout: Duration::from_secs(1),
        };

        Self {
            engine: OrderLifecycleEngine::new(stores, settings),
            catalog,
            orders,
            reviews,
        }
    }

    pub async fn place(&self, menu: &str, address: &str) -> Order {
        match self.engine.handle_order(place(menu, address)).await.unwrap() {
            OrderOutcome::Placed { order, .. } => order,
            other => panic!("expected a placed order, got {other:?}"),
        }
    }

    pub async fn set_state(&self, menu: &str, state: &str) {
        self.engine.handle_order(update_state(menu, state)).await.unwrap();
    }

    pub async fn register(&self, menu: &str, price: &str) -> MenuItem {
        self.engine
            .register_menu(RegisterMenu {
                menu_name: menu.to_string(),
                price: price.to_string(),
                recommend: String::new(),
            })
            .await
            .unwrap()
    }
}

pub fn place(menu: &str, address: &str) -> OrderCommand {
    OrderCommand::PlaceOrder {
        menu_name: menu.to_string(),
        customer_phone: "010-1234-5678".to_string(),
        address: address.to_string(),
    }
}

pub fn add_menu(menu: &str, change_menu: &str) -> OrderCommand {
    OrderCommand::AddMenu {
        menu_name: menu.to_string(),
        change_menu: change_menu.to_string(),
    }
}

pub fn change_menu(menu: &str, after_menu: &str) -> OrderCommand {
    OrderCommand::ChangeMenu {
        menu_name: menu.to_string(),
        after_menu: after_menu.to_string(),
    }
}

pub fn update_state(menu: &str, state: &str) -> OrderCommand {
    OrderCommand::UpdateState {
        menu_name: menu.to_string(),
        state: state.to_string(),
    }
}
