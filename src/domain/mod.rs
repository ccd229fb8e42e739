// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each area has its own subdirectory with value objects, commands, errors
// and pure rule evaluation. Nothing here performs I/O; the engine feeds the
// rules with data loaded from the stores.
//
// ============================================================================

pub mod policy;
pub mod catalog;
pub mod order;
pub mod review;

pub use policy::ValidationMode;
