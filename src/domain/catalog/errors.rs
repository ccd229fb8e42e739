use crate::domain::policy::MalformedNumber;

// ============================================================================
// Catalog Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("menu name cannot be empty")]
    EmptyMenuName,

    #[error("price cannot be empty")]
    EmptyPrice,

    #[error("price cannot be negative: {0}")]
    NegativePrice(i64),

    #[error(transparent)]
    Malformed(#[from] MalformedNumber),

    #[error("unknown sort option: {0:?}")]
    UnknownSortKey(String),

    #[error("cannot find menu {0:?}")]
    MenuNotFound(String),

    #[error("nothing to delete: no menu named {0:?}")]
    NothingToDelete(String),
}
