//! Logging setup
//!
//! Installs the global `tracing` subscriber. Called once from `main`; the
//! library itself only emits events.

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level. Fails when a
/// subscriber is already installed.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(logging)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Filter from `RUST_LOG` when it holds valid directives, else the configured level
pub fn env_filter(logging: &LoggingConfig) -> Result<EnvFilter> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(from_env.as_deref(), &logging.level)
}

fn build_filter(env_directives: Option<&str>, level: &str) -> Result<EnvFilter> {
    match env_directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        Some(filter) => Ok(filter),
        None => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("Invalid log filter '{}': {}", level, e)),
    }
}
