// ============================================================================
// Catalog Commands - seller intent, numeric fields still raw form text
// ============================================================================

#[derive(Debug, Clone)]
pub struct RegisterMenu {
    pub menu_name: String,
    pub price: String,
    pub recommend: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMenu {
    pub menu_name: String,
    pub price: String,
    pub recommend: String,
}
