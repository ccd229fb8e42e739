use chrono::{DateTime, Utc};

use crate::domain::policy::ValidationMode;
use super::commands::OrderCommand;
use super::decisions::OrderDecision;
use super::errors::OrderError;
use super::value_objects::{Order, OrderState};

// ============================================================================
// Order Lifecycle Rules - pure decision logic
// ============================================================================
//
// `validate` runs before any store access. `decide` receives the most recent
// order for the command's menu name (when one was needed) and returns the
// mutation to perform or a refusal. Neither touches a store.
//
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderRules {
    mode: ValidationMode,
}

impl OrderRules {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Input-edge checks that need no stored data
    pub fn validate(&self, command: &OrderCommand) -> Result<(), OrderError> {
        if command.menu_name().is_empty() {
            return Err(OrderError::EmptyMenuName);
        }

        match command {
            OrderCommand::PlaceOrder { address, .. } => {
                if address.is_empty() {
                    return Err(OrderError::EmptyAddress);
                }
            }
            OrderCommand::AddMenu { change_menu: requested, .. }
            | OrderCommand::ChangeMenu { after_menu: requested, .. } => {
                if requested.is_empty() {
                    return Err(OrderError::EmptyRequestedMenu);
                }
            }
            OrderCommand::UpdateState { state, .. } => {
                if state.is_empty() {
                    return Err(OrderError::EmptyState);
                }
                if self.mode.is_strict() && !OrderState::parse(state).is_recognized() {
                    return Err(OrderError::UnknownState(state.clone()));
                }
            }
        }

        Ok(())
    }

    /// Whether `decide` needs the most recent stored order for the menu name
    pub fn needs_current_order(&self, command: &OrderCommand) -> bool {
        match command {
            OrderCommand::PlaceOrder { .. } => false,
            OrderCommand::AddMenu { .. } | OrderCommand::ChangeMenu { .. } => true,
            OrderCommand::UpdateState { .. } => self.mode.is_strict(),
        }
    }

    pub fn decide(
        &self,
        command: &OrderCommand,
        current: Option<&Order>,
        now: DateTime<Utc>,
    ) -> Result<OrderDecision, OrderError> {
        match command {
            OrderCommand::PlaceOrder { menu_name, customer_phone, address } => Ok(
                OrderDecision::Place(Order::received(menu_name, customer_phone, address, now)),
            ),

            OrderCommand::AddMenu { menu_name, change_menu } => {
                let current = current.ok_or_else(|| OrderError::NoPriorOrder(menu_name.clone()))?;

                match current.state {
                    OrderState::Delivering => Ok(OrderDecision::Reorder {
                        original_state: current.state.clone(),
                        order: Order::received(
                            change_menu,
                            current.customer_phone.clone(),
                            current.address.clone(),
                            now,
                        ),
                    }),
                    _ => Ok(OrderDecision::RenameMenu {
                        menu_name: menu_name.clone(),
                        new_menu_name: format!("{} , {}", current.menu_name, change_menu),
                        appended: true,
                    }),
                }
            }

            OrderCommand::ChangeMenu { menu_name, after_menu } => {
                let current = current.ok_or_else(|| OrderError::NoPriorOrder(menu_name.clone()))?;

                match current.state {
                    OrderState::Received => Ok(OrderDecision::RenameMenu {
                        menu_name: menu_name.clone(),
                        new_menu_name: after_menu.clone(),
                        appended: false,
                    }),
                    // Cooking, Delivering, and anything unrecognized
                    _ => Ok(OrderDecision::Refuse { state: current.state.clone() }),
                }
            }

            OrderCommand::UpdateState { menu_name, state } => {
                let target = OrderState::parse(state);

                if self.mode.is_strict() {
                    let current = current.ok_or_else(|| OrderError::NoPriorOrder(menu_name.clone()))?;
                    if target.is_backward_from(&current.state) {
                        return Err(OrderError::BackwardTransition {
                            from: current.state.clone(),
                            to: target,
                        });
                    }
                }

                Ok(OrderDecision::SetState { menu_name: menu_name.clone(), state: target })
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
