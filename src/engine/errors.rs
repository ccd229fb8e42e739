use crate::domain::catalog::CatalogError;
use crate::domain::order::OrderError;
use crate::domain::review::ReviewError;
use crate::store::StoreError;

// ============================================================================
// Engine Error Taxonomy
// ============================================================================
//
// Every rule error from the domain collapses into one of five kinds. The
// request surface maps kinds to status codes; the message is user-facing.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Required input missing, empty or malformed. No store was touched.
    #[error("{0}")]
    Validation(String),

    /// Referenced menu, order or review does not exist. Nothing was written.
    #[error("{0}")]
    NotFound(String),

    /// Disallowed given the current order state
    #[error("{0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// A stored record came back blank during a scan
    #[error("integrity anomaly: {0}")]
    IntegrityAnomaly(String),
}

impl EngineError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::NotFound(_) => "not_found",
            EngineError::Conflict(_) => "conflict",
            EngineError::Store(_) => "store",
            EngineError::IntegrityAnomaly(_) => "integrity",
        }
    }
}

impl From<OrderError> for EngineError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::EmptyMenuName
            | OrderError::EmptyAddress
            | OrderError::EmptyRequestedMenu
            | OrderError::EmptyState
            | OrderError::UnknownState(_) => EngineError::Validation(message),
            OrderError::NoPriorOrder(_) => EngineError::NotFound(message),
            OrderError::BackwardTransition { .. } => EngineError::Conflict(message),
        }
    }
}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::EmptyMenuName
            | CatalogError::EmptyPrice
            | CatalogError::NegativePrice(_)
            | CatalogError::Malformed(_)
            | CatalogError::UnknownSortKey(_) => EngineError::Validation(message),
            CatalogError::MenuNotFound(_) | CatalogError::NothingToDelete(_) => {
                EngineError::NotFound(message)
            }
        }
    }
}

impl From<ReviewError> for EngineError {
    fn from(err: ReviewError) -> Self {
        let message = err.to_string();
        match err {
            ReviewError::EmptyMenuName | ReviewError::EmptyComment | ReviewError::Malformed(_) => {
                EngineError::Validation(message)
            }
            ReviewError::NotOrdered(_) | ReviewError::NoReviewYet(_) => EngineError::NotFound(message),
        }
    }
}
