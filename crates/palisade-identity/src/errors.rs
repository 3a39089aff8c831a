//! Identity manager error types.

use palisade_storage::StorageError;
use thiserror::Error;

/// Identity manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A store failed to open; fatal to construction
    #[error("Problem opening the {store} store: {source}")]
    StoreOpen {
        store: &'static str,
        #[source]
        source: StorageError,
    },

    /// One or both stores failed to close
    #[error("Problem closing the manager. System store: {system} / Token store: {token}")]
    CloseFailure { system: String, token: String },

    /// An entity with this name already exists
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    /// A referenced entity does not exist
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    /// Malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Credential hashing or verification failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ManagerError {
    /// True for duplicate-entity errors
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ManagerError::Duplicate { .. })
    }

    /// True for entity-not-found errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagerError::NotFound { .. })
    }
}

/// Result type for identity manager operations
pub type Result<T> = std::result::Result<T, ManagerError>;
