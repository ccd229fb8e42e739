use super::value_objects::OrderState;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("menu name cannot be empty")]
    EmptyMenuName,

    #[error("address cannot be empty")]
    EmptyAddress,

    #[error("requested menu cannot be empty")]
    EmptyRequestedMenu,

    #[error("order state cannot be empty")]
    EmptyState,

    #[error("unknown order state: {0:?}")]
    UnknownState(String),

    #[error("no prior order for menu {0:?}")]
    NoPriorOrder(String),

    #[error("cannot move order from {from} back to {to}")]
    BackwardTransition { from: OrderState, to: OrderState },
}
