//! peliculas_api - a movie and actor catalog served as a JSON REST API.
//!
//! Two collections, each persisted as one JSON document that is loaded
//! wholesale per request and rewritten wholesale per mutation. Deleting an
//! actor cascades into the movie collection.

mod catalog;
pub mod config;
mod error;
pub mod id;
pub mod logging;
mod model;
mod store;

#[cfg(feature = "http")]
pub mod http;

pub use catalog::{
    actor_id_from_json, ActorPatch, Catalog, MoviePatch, MovieQuery, NewActor, NewMovie,
};
pub use config::Config;
pub use error::{CatalogError, StoreError};
pub use id::{IdProvider, RandomIds, SequentialIds};
pub use model::{Actor, ActorDocument, Document, Movie, MovieDocument};
pub use store::{DocumentLocks, DocumentStore, InMemoryDocumentStore, JsonFileStore};
