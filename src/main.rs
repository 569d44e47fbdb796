use std::sync::Arc;

use clap::Parser;
use peliculas_api::{http, logging, Catalog, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::setup_tracing();

    let store = config.open_store()?;
    tracing::info!(data_dir = %store.dir().display(), "document store ready");

    let catalog = Arc::new(Catalog::with_random_ids(store));
    http::serve(catalog, &config.addr()).await?;
    Ok(())
}
