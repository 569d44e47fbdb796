//! Catalog - the movie and actor resource operations.
//!
//! `Catalog<S, I>` owns a [`DocumentStore`] and an [`IdProvider`]. Every
//! operation loads the relevant document fresh, works on it in memory and,
//! if it changed anything, saves the whole document back. Mutations on one
//! document are serialized through [`DocumentLocks`]; reads are not.
//!
//! Deleting an actor touches two documents: the actor document is committed
//! first, then its id is stripped from every movie. The pair is not atomic.
//! If the second save fails the actor stays deleted while movies still
//! reference it, and the caller sees the store error.
//!
//! ## Example
//!
//! ```ignore
//! use peliculas_api::{Catalog, InMemoryDocumentStore, NewActor, SequentialIds};
//!
//! let catalog = Catalog::new(InMemoryDocumentStore::new(), SequentialIds::new());
//! let keanu = catalog.create_actor(NewActor { name: "Keanu Reeves".into(), birth_year: 1964 })?;
//! assert_eq!(keanu.id, "a_1");
//! ```

mod actors;
mod input;
mod movies;

use crate::error::CatalogError;
use crate::id::{IdProvider, RandomIds};
use crate::store::{DocumentLocks, DocumentStore};

pub use input::{actor_id_from_json, ActorPatch, MoviePatch, MovieQuery, NewActor, NewMovie};

/// Attempts at drawing an id not already present in the collection.
const MAX_ID_ATTEMPTS: usize = 16;

/// Movie and actor operations over a document store.
pub struct Catalog<S, I = RandomIds> {
    store: S,
    ids: I,
    locks: DocumentLocks,
}

impl<S: DocumentStore> Catalog<S, RandomIds> {
    /// Catalog with random ids.
    pub fn with_random_ids(store: S) -> Self {
        Self::new(store, RandomIds)
    }
}

impl<S: DocumentStore, I: IdProvider> Catalog<S, I> {
    pub fn new(store: S, ids: I) -> Self {
        Self {
            store,
            ids,
            locks: DocumentLocks::new(),
        }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Draw a fresh id for `prefix` that `taken` does not reject.
    fn fresh_id(&self, prefix: &str, taken: impl Fn(&str) -> bool) -> Result<String, CatalogError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.new_id(prefix);
            if !taken(&id) {
                return Ok(id);
            }
            tracing::debug!(%id, "generated id collides, retrying");
        }
        Err(CatalogError::IdSpaceExhausted(prefix.to_string()))
    }
}
