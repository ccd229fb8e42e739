use super::value_objects::{Order, OrderState};

// ============================================================================
// Order Decisions - the store mutation a command resolves to
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderDecision {
    /// Insert a brand-new order
    Place(Order),

    /// Insert a new order because the original is already out for delivery
    Reorder { original_state: OrderState, order: Order },

    /// Rewrite the menu name of the most recent matching order
    RenameMenu {
        menu_name: String,
        new_menu_name: String,
        appended: bool,
    },

    /// Overwrite the state of the most recent matching order
    SetState { menu_name: String, state: OrderState },

    /// Business rules forbid the change; nothing is written
    Refuse { state: OrderState },
}

impl OrderDecision {
    pub fn writes(&self) -> bool {
        !matches!(self, OrderDecision::Refuse { .. })
    }
}
