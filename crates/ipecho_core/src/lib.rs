//! Core policies for the ipecho service: configuration, readiness gating,
//! client-IP resolution and the static credential store.
//!
//! Nothing in this crate knows about HTTP framing; the server crate feeds it
//! header values and socket addresses and turns the results into responses.

use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod credentials;
pub mod ip;
pub mod readiness;

pub use config::Config;
pub use credentials::CredentialStore;
pub use ip::resolve_client_ip;
pub use readiness::{Readiness, StartupClock};

#[derive(Debug, Error)]
pub enum IpechoError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to read credentials from {path}: {source}")]
    CredentialsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no valid credentials found in {path}")]
    NoCredentials { path: PathBuf },
}

/// Result type alias for core operations.
pub type IpechoResult<T> = Result<T, IpechoError>;
