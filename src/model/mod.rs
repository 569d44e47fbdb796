//! Catalog records and the documents that persist them.
//!
//! Each collection lives in its own document, stored wholesale as
//! `{ "<collection>": [ {record}, ... ] }`.
//!
//! ## Example
//!
//! ```ignore
//! use peliculas_api::{Document, MovieDocument};
//!
//! let doc: MovieDocument = store.load()?;
//! assert_eq!(MovieDocument::NAME, "peliculas");
//! ```

mod actor;
mod movie;

use serde::{de::DeserializeOwned, Serialize};

pub use actor::{Actor, ActorDocument};
pub use movie::{Movie, MovieDocument};

/// A persisted collection document.
pub trait Document: Serialize + DeserializeOwned + Default + Send + Sync {
    /// Document name. Also the key wrapping the record array.
    const NAME: &'static str;
}
