pub mod app;
pub mod config;
mod error;
pub mod klaviyo_client;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use klaviyo_client::KlaviyoClient;

use tracing_subscriber::EnvFilter;

/// Tracing for production builds: compact, "info" unless `RUST_LOG` overrides.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Tracing for debug builds.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();
}
