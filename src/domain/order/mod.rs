// ============================================================================
// Order Domain - lifecycle rules for customer orders
// ============================================================================
//
// - Value objects (Order, OrderState)
// - Commands (PlaceOrder, AddMenu, ChangeMenu, UpdateState)
// - Decisions (the store mutation a command resolves to)
// - Errors (OrderError enum)
// - Rules (pure validation and decision logic)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod decisions;
pub mod errors;
pub mod rules;

pub use value_objects::*;
pub use commands::*;
pub use decisions::*;
pub use errors::*;
pub use rules::*;
