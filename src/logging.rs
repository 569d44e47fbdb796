/// Initialize the tracing subscriber.
///
/// Verbosity comes from `RUST_LOG` (e.g. `RUST_LOG=peliculas_api=debug`);
/// defaults to `info` when unset.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
