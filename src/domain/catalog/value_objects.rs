use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// Catalog Value Objects
// ============================================================================

/// A sellable catalog entry, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: i64,
    pub recommend_score: i64,
    /// Aggregated from reviews; starts at 0 and is never customer-settable
    pub rating: i64,
    pub released_at: DateTime<Utc>,
}

/// The seller-editable subset of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuUpdate {
    pub price: i64,
    pub recommend_score: i64,
}

impl MenuItem {
    pub fn apply(&mut self, update: MenuUpdate) {
        self.price = update.price;
        self.recommend_score = update.recommend_score;
    }
}

/// Column the catalog listing is sorted by (always descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSortKey {
    Price,
    Recommend,
    Rating,
    Released,
}

impl MenuSortKey {
    /// Accepts both the current names and the legacy field names
    /// (`grade`, `releaseTime`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price" => Some(MenuSortKey::Price),
            "recommend" | "recommendscore" => Some(MenuSortKey::Recommend),
            "rating" | "grade" => Some(MenuSortKey::Rating),
            "released" | "releasedat" | "releasetime" => Some(MenuSortKey::Released),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MenuSortKey::Price => "price",
            MenuSortKey::Recommend => "recommend",
            MenuSortKey::Rating => "rating",
            MenuSortKey::Released => "released",
        }
    }

    /// Descending by key, ties broken by name ascending
    pub fn compare(self, a: &MenuItem, b: &MenuItem) -> Ordering {
        let by_key = match self {
            MenuSortKey::Price => b.price.cmp(&a.price),
            MenuSortKey::Recommend => b.recommend_score.cmp(&a.recommend_score),
            MenuSortKey::Rating => b.rating.cmp(&a.rating),
            MenuSortKey::Released => b.released_at.cmp(&a.released_at),
        };
        by_key.then_with(|| a.name.cmp(&b.name))
    }

    pub fn sort(self, items: &mut [MenuItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for MenuSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
