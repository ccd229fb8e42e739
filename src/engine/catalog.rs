use chrono::Utc;

use crate::domain::catalog::{CatalogError, MenuItem, RegisterMenu, UpdateMenu};
use super::{EngineError, OrderLifecycleEngine};

// ============================================================================
// Catalog Operations
// ============================================================================

impl OrderLifecycleEngine {
    /// Browse the catalog, descending by the requested sort key
    pub async fn list_menu(&self, sort: &str) -> Result<Vec<MenuItem>, EngineError> {
        self.observe("list_menu", self.run_list_menu(sort)).await
    }

    pub async fn register_menu(&self, command: RegisterMenu) -> Result<MenuItem, EngineError> {
        self.observe("register_menu", self.run_register_menu(command)).await
    }

    /// Overwrite price and recommend score of an existing item
    pub async fn update_menu(&self, command: UpdateMenu) -> Result<MenuItem, EngineError> {
        self.observe("update_menu", self.run_update_menu(command)).await
    }

    pub async fn delete_menu(&self, menu_name: &str) -> Result<(), EngineError> {
        self.observe("delete_menu", self.run_delete_menu(menu_name)).await
    }

    async fn run_list_menu(&self, sort: &str) -> Result<Vec<MenuItem>, EngineError> {
        let sort_key = self.catalog_rules.sort_key(sort)?;
        let items = self
            .store_call("catalog.list_all", self.stores.catalog.list_all(sort_key))
            .await?;

        tracing::debug!(sort_key = %sort_key, count = items.len(), "Listed menu");
        Ok(items)
    }

    async fn run_register_menu(&self, command: RegisterMenu) -> Result<MenuItem, EngineError> {
        let item = self.catalog_rules.new_item(&command, Utc::now())?;
        self.store_call("catalog.insert", self.stores.catalog.insert(item.clone()))
            .await?;

        tracing::info!(menu_name = %item.name, price = item.price, "✅ Menu registered");
        Ok(item)
    }

    async fn run_update_menu(&self, command: UpdateMenu) -> Result<MenuItem, EngineError> {
        let update = self.catalog_rules.update(&command)?;
        let name = command.menu_name;

        let mut item = self
            .store_call("catalog.find_by_name", self.stores.catalog.find_by_name(&name))
            .await?
            .ok_or_else(|| CatalogError::MenuNotFound(name.clone()))?;

        let affected = self
            .store_call("catalog.update_fields", self.stores.catalog.update_fields(&name, update))
            .await?;
        // Deleted between the lookup and the update
        if affected == 0 {
            return Err(CatalogError::MenuNotFound(name).into());
        }

        item.apply(update);
        tracing::info!(
            menu_name = %name,
            price = item.price,
            recommend_score = item.recommend_score,
            "✅ Menu updated"
        );
        Ok(item)
    }

    async fn run_delete_menu(&self, menu_name: &str) -> Result<(), EngineError> {
        self.catalog_rules.require_name(menu_name)?;

        let affected = self
            .store_call("catalog.delete_by_name", self.stores.catalog.delete_by_name(menu_name))
            .await?;
        if affected == 0 {
            return Err(CatalogError::NothingToDelete(menu_name.to_string()).into());
        }

        tracing::info!(menu_name, "Menu deleted");
        Ok(())
    }
}
