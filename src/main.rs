//! tempmon — samples a hardware temperature once a second and serves the
//! last hour as JSON for a browser dashboard.
//!
//! Usage:  `tempmon [path/to/tempmon.toml]`   (log level via `RUST_LOG`)

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => tempmon_config::default_path(),
    };
    tracing::info!(
        "tempmon v{} using config '{}'",
        env!("CARGO_PKG_VERSION"),
        config_path.display()
    );

    let config = tempmon_config::load(&config_path)
        .with_context(|| format!("loading config from '{}'", config_path.display()))?;

    tempmon_server::run(config)
        .await
        .context("temperature server stopped")
}
