use rookery_config::ConfigError;

use crate::service::ServiceState;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A precondition on the arguments failed; no state was changed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration collaborator failed during load or save.
    #[error("persistence error: {0}")]
    Persistence(#[from] ConfigError),

    /// A lifecycle operation was called in the wrong state.
    #[error("store is {actual}, expected {expected}")]
    WrongState {
        expected: ServiceState,
        actual: ServiceState,
    },

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
