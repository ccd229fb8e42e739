// ============================================================================
// Order Commands - Represent customer and seller intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Customer places a new order
    PlaceOrder {
        menu_name: String,
        customer_phone: String,
        address: String,
    },
    /// Customer appends a menu; becomes a new order once delivery started
    AddMenu {
        menu_name: String,
        change_menu: String,
    },
    /// Customer replaces the menu; refused once cooking started
    ChangeMenu {
        menu_name: String,
        after_menu: String,
    },
    /// Seller moves the most recent order for a menu to another state
    UpdateState {
        menu_name: String,
        state: String,
    },
}

impl OrderCommand {
    /// The menu name the command is keyed on
    pub fn menu_name(&self) -> &str {
        match self {
            OrderCommand::PlaceOrder { menu_name, .. }
            | OrderCommand::AddMenu { menu_name, .. }
            | OrderCommand::ChangeMenu { menu_name, .. }
            | OrderCommand::UpdateState { menu_name, .. } => menu_name,
        }
    }

    /// Label used for logs and metrics
    pub fn operation(&self) -> &'static str {
        match self {
            OrderCommand::PlaceOrder { .. } => "place_order",
            OrderCommand::AddMenu { .. } => "add_menu",
            OrderCommand::ChangeMenu { .. } => "change_menu",
            OrderCommand::UpdateState { .. } => "update_order_state",
        }
    }
}
