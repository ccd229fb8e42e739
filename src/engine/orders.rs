use chrono::Utc;

use crate::domain::order::{Order, OrderCommand, OrderDecision, OrderError};
use super::{EngineError, OrderLifecycleEngine, OrderOutcome};

// ============================================================================
// Order Commands
// ============================================================================

impl OrderLifecycleEngine {
    /// Handle a customer or seller order command
    pub async fn handle_order(&self, command: OrderCommand) -> Result<OrderOutcome, EngineError> {
        self.observe(command.operation(), self.run_order_command(&command)).await
    }

    /// All orders, most recent first. Fails if any stored record is blank.
    pub async fn list_orders(&self) -> Result<Vec<Order>, EngineError> {
        self.observe("list_orders", self.scan_orders()).await
    }

    async fn run_order_command(&self, command: &OrderCommand) -> Result<OrderOutcome, EngineError> {
        self.order_rules.validate(command)?;

        let current = if self.order_rules.needs_current_order(command) {
            self.store_call(
                "orders.find_latest_by_menu_name",
                self.stores.orders.find_latest_by_menu_name(command.menu_name()),
            )
            .await?
        } else {
            None
        };

        let decision = self.order_rules.decide(command, current.as_ref(), Utc::now())?;

        tracing::debug!(
            operation = command.operation(),
            menu_name = %command.menu_name(),
            writes = decision.writes(),
            "Order command decided"
        );

        match decision {
            OrderDecision::Place(order) => {
                self.store_call("orders.insert", self.stores.orders.insert(order.clone())).await?;
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_placed();
                }

                let order_number = self.count_orders().await?;

                tracing::info!(
                    order_id = %order.id,
                    menu_name = %order.menu_name,
                    order_number,
                    "✅ Order placed"
                );

                Ok(OrderOutcome::Placed { order, order_number })
            }

            OrderDecision::Reorder { original_state, order } => {
                self.store_call("orders.insert", self.stores.orders.insert(order.clone())).await?;
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_placed();
                }

                tracing::info!(
                    original_menu = %command.menu_name(),
                    original_state = %original_state,
                    order_id = %order.id,
                    menu_name = %order.menu_name,
                    "Original order already in delivery, placed a new order"
                );

                Ok(OrderOutcome::Reordered { order })
            }

            OrderDecision::RenameMenu { menu_name, new_menu_name, appended } => {
                let affected = self
                    .store_call(
                        "orders.update_menu_name",
                        self.stores.orders.update_menu_name(&menu_name, &new_menu_name),
                    )
                    .await?;

                // The order was renamed by a concurrent request in between
                if affected == 0 {
                    return Err(OrderError::NoPriorOrder(menu_name).into());
                }

                tracing::info!(menu_name = %menu_name, new_menu_name = %new_menu_name, appended, "✅ Order menu updated");

                Ok(if appended {
                    OrderOutcome::MenuAppended { menu_name: new_menu_name }
                } else {
                    OrderOutcome::MenuChanged { menu_name: new_menu_name }
                })
            }

            OrderDecision::SetState { menu_name, state } => {
                let affected = self
                    .store_call(
                        "orders.update_state",
                        self.stores.orders.update_state(&menu_name, &state),
                    )
                    .await?;

                if affected == 0 {
                    return Err(OrderError::NoPriorOrder(menu_name).into());
                }

                if !state.is_recognized() {
                    tracing::warn!(menu_name = %menu_name, state = %state, "Stored unrecognized order state");
                }
                tracing::info!(menu_name = %menu_name, state = %state, "✅ Order state changed");

                Ok(OrderOutcome::StateUpdated { menu_name, state })
            }

            OrderDecision::Refuse { state } => {
                tracing::warn!(
                    operation = command.operation(),
                    menu_name = %command.menu_name(),
                    state = %state,
                    "Menu change refused"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_soft_rejection(command.operation(), &state);
                }

                Ok(OrderOutcome::ChangeRefused { state })
            }
        }
    }

    /// Position of the newest order: the count of every stored order
    async fn count_orders(&self) -> Result<usize, EngineError> {
        Ok(self.scan_orders().await?.len())
    }

    async fn scan_orders(&self) -> Result<Vec<Order>, EngineError> {
        let orders = self.store_call("orders.list_all", self.stores.orders.list_all()).await?;
        ensure_no_blank(&orders)?;
        Ok(orders)
    }
}

fn ensure_no_blank(orders: &[Order]) -> Result<(), EngineError> {
    if let Some(position) = orders.iter().position(Order::is_blank) {
        tracing::error!(position, total = orders.len(), "Blank order record found in order history");
        return Err(EngineError::IntegrityAnomaly(format!(
            "blank order record at position {} of {}",
            position + 1,
            orders.len()
        )));
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
