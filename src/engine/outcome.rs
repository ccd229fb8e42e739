use crate::domain::order::{Order, OrderState};

/// Result of a successfully handled order command
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    /// `order_number` is the 1-based position among all stored orders
    Placed { order: Order, order_number: usize },
    MenuAppended { menu_name: String },
    /// The original order was already out for delivery
    Reordered { order: Order },
    MenuChanged { menu_name: String },
    /// Soft rejection: nothing was written
    ChangeRefused { state: OrderState },
    StateUpdated { menu_name: String, state: OrderState },
}

impl OrderOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            OrderOutcome::Placed { .. } => "Order Success",
            OrderOutcome::MenuAppended { .. } => "Menu add success",
            OrderOutcome::Reordered { .. } => {
                "Sorry, you can not add menu to an order in delivery. A new order was placed"
            }
            OrderOutcome::MenuChanged { .. } => "Menu change success",
            OrderOutcome::ChangeRefused { .. } => "Sorry, you can not change menu now",
            OrderOutcome::StateUpdated { .. } => "State change success",
        }
    }
}
