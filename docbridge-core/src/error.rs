//! Error types and result types for adapter and backend operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible operations. Absence of a
//! document is never reported through this type: lookups return `Ok(None)` and
//! deletes return `Ok(false)` instead.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a document store.
///
/// Remote failures are split into [`StoreError::Unavailable`] (transient: network,
/// server selection, driver errors labelled retryable) and [`StoreError::Backend`]
/// (everything else). Nothing in this crate retries; callers can consult
/// [`StoreError::is_transient`] to decide for themselves.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Conversion between the canonical record model and the store's value tree failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during backend construction or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// The backend was asked to modify a document that does not exist.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The named collection is not one of the known collections.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    /// The document has an invalid structure (e.g. the stored value is not a document).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// A transient failure in the underlying store; the same call may succeed later.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// A permanent failure reported by the underlying store.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` when the error is worth retrying at a later time.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_transient() {
        assert!(StoreError::Unavailable("timeout".into()).is_transient());
        assert!(!StoreError::Backend("permission denied".into()).is_transient());
        assert!(!StoreError::DocumentNotFound("c1".into(), "courses".into()).is_transient());
    }
}
