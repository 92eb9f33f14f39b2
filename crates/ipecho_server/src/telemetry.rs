//! Logging setup.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter from `IPECHO_LOG_LEVEL`, falling back to `RUST_LOG`, then `info`.
pub fn log_filter() -> String {
    std::env::var("IPECHO_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Parse a filter directive, falling back to `info` when it is invalid.
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global compact subscriber. Call once from `main`.
pub fn init_tracing() {
    let log_env = log_filter();
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter(&log_env))
        .init();
    tracing::info!(%log_env, "ipecho: log filter");
}
