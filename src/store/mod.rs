//! Document store - whole-document load/save for the catalog collections.
//!
//! Every load re-reads the backing medium and every save rewrites the whole
//! document. There is no caching and no isolation between callers: two
//! interleaved load/mutate/save cycles on the same document lose one update
//! unless the caller serializes them through [`DocumentLocks`].
//!
//! ## Example
//!
//! ```ignore
//! use peliculas_api::{DocumentStore, InMemoryDocumentStore, MovieDocument};
//!
//! let store = InMemoryDocumentStore::new();
//! let mut doc: MovieDocument = store.load()?;
//! doc.peliculas.push(movie);
//! store.save(&doc)?;
//! ```

mod in_memory;
mod json_file;
mod locks;

use tracing::debug;

use crate::error::StoreError;
use crate::model::Document;

pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;
pub use locks::DocumentLocks;

/// Raw byte storage for named documents, with typed load/save on top.
pub trait DocumentStore: Send + Sync {
    /// Read the stored bytes of a document.
    ///
    /// `Ok(None)` means the backend has never seen the document, which loads
    /// as an empty collection. Backends that require the document to exist
    /// return [`StoreError::Io`] instead.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the stored bytes of a document.
    fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Load and decode a whole document.
    fn load<D: Document>(&self) -> Result<D, StoreError>
    where
        Self: Sized,
    {
        match self.read(D::NAME)? {
            Some(bytes) => {
                debug!(document = D::NAME, bytes = bytes.len(), "loaded document");
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                    document: D::NAME.to_string(),
                    source,
                })
            }
            None => {
                debug!(document = D::NAME, "document absent, starting empty");
                Ok(D::default())
            }
        }
    }

    /// Encode and persist a whole document.
    fn save<D: Document>(&self, doc: &D) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec_pretty(doc).map_err(|source| StoreError::Encode {
            document: D::NAME.to_string(),
            source,
        })?;
        debug!(document = D::NAME, bytes = bytes.len(), "saving document");
        self.write(D::NAME, bytes)
    }
}
