use serde::{Deserialize, Serialize};

/// A customer's grade and comment for a menu name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub menu_name: String,
    pub grade: i32,
    pub comment: String,
}
