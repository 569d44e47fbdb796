//! Server configuration from command-line flags and environment.

use std::path::PathBuf;

use clap::Parser;

use crate::error::StoreError;
use crate::model::{ActorDocument, Document, MovieDocument};
use crate::store::JsonFileStore;

/// Movie and actor catalog REST API.
#[derive(Debug, Clone, Parser)]
#[command(name = "peliculas_api", version, about)]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "PELICULAS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PELICULAS_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding the JSON documents.
    #[arg(long, env = "PELICULAS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Movie document file, relative to the data directory.
    #[arg(long, env = "PELICULAS_MOVIES_FILE", default_value = "peliculas.json")]
    pub movies_file: PathBuf,

    /// Actor document file, relative to the data directory.
    #[arg(long, env = "PELICULAS_ACTORS_FILE", default_value = "actores.json")]
    pub actors_file: PathBuf,
}

impl Config {
    /// `host:port` listen address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the file store described by this config, seeding missing documents.
    pub fn open_store(&self) -> Result<JsonFileStore, StoreError> {
        let store = JsonFileStore::new(&self.data_dir)?
            .with_file(MovieDocument::NAME, &self.movies_file)
            .with_file(ActorDocument::NAME, &self.actors_file);
        store.ensure::<MovieDocument>()?;
        store.ensure::<ActorDocument>()?;
        Ok(store)
    }
}
