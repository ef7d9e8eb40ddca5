//! Tracing setup for the binaries

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber; `RUST_LOG` overrides the default `info` level
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str().to_lowercase()));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
