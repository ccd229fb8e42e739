use chrono::{DateTime, Utc};

use crate::domain::policy::ValidationMode;
use super::commands::{RegisterMenu, UpdateMenu};
use super::errors::CatalogError;
use super::value_objects::{MenuItem, MenuSortKey, MenuUpdate};

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogRules {
    mode: ValidationMode,
}

impl CatalogRules {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Build the item to insert. Rating always starts at 0.
    pub fn new_item(
        &self,
        command: &RegisterMenu,
        now: DateTime<Utc>,
    ) -> Result<MenuItem, CatalogError> {
        let update = self.fields(&command.menu_name, &command.price, &command.recommend)?;

        Ok(MenuItem {
            name: command.menu_name.clone(),
            price: update.price,
            recommend_score: update.recommend_score,
            rating: 0,
            released_at: now,
        })
    }

    pub fn update(&self, command: &UpdateMenu) -> Result<MenuUpdate, CatalogError> {
        self.fields(&command.menu_name, &command.price, &command.recommend)
    }

    pub fn require_name(&self, menu_name: &str) -> Result<(), CatalogError> {
        if menu_name.is_empty() {
            return Err(CatalogError::EmptyMenuName);
        }
        Ok(())
    }

    pub fn sort_key(&self, raw: &str) -> Result<MenuSortKey, CatalogError> {
        MenuSortKey::parse(raw).ok_or_else(|| CatalogError::UnknownSortKey(raw.to_string()))
    }

    fn fields(&self, menu_name: &str, price: &str, recommend: &str) -> Result<MenuUpdate, CatalogError> {
        self.require_name(menu_name)?;
        if price.is_empty() {
            return Err(CatalogError::EmptyPrice);
        }

        let price: i64 = self.mode.parse_integer("price", price)?;
        if price < 0 {
            return Err(CatalogError::NegativePrice(price));
        }

        // recommend is optional on the form
        let recommend_score = if recommend.is_empty() {
            0
        } else {
            self.mode.parse_integer("recommend", recommend)?
        };

        Ok(MenuUpdate { price, recommend_score })
    }
}
