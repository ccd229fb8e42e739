// ============================================================================
// Review Domain - grades gated by order history
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod rules;

pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use rules::*;
