//! Error types for document storage and catalog operations.

use thiserror::Error;

/// Failure while loading or saving a persisted document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("document {document} is unreadable or unwritable: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },
    /// The stored bytes are not a well-formed document.
    #[error("document {document} is corrupt: {source}")]
    Parse {
        document: String,
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory value could not be serialized.
    #[error("document {document} could not be encoded: {source}")]
    Encode {
        document: String,
        #[source]
        source: serde_json::Error,
    },
    /// A thread panicked while holding this document's lock.
    #[error("lock for document {0} poisoned")]
    LockPoisoned(String),
}

/// Error returned by every catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or malformed request field.
    #[error("{0}")]
    InvalidInput(String),
    /// No record with the given id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// The id provider kept producing ids already present in the collection.
    #[error("could not generate a free id with prefix {0}")]
    IdSpaceExhausted(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CatalogError::InvalidInput(msg.into())
    }

    pub(crate) fn movie_not_found(id: &str) -> Self {
        CatalogError::NotFound {
            kind: "movie",
            id: id.to_string(),
        }
    }

    pub(crate) fn actor_not_found(id: &str) -> Self {
        CatalogError::NotFound {
            kind: "actor",
            id: id.to_string(),
        }
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::InvalidInput(_) => 400,
            CatalogError::NotFound { .. } => 404,
            CatalogError::IdSpaceExhausted(_) => 500,
            CatalogError::Store(_) => 500,
        }
    }
}
