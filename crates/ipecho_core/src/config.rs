use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::{IpechoError, IpechoResult};

pub const DEFAULT_READINESS_SECS: u64 = 30;
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_USERS_FILE: &str = "users.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub address: SocketAddr,
    pub readiness_threshold: Duration,
    pub auth_enabled: bool,
    pub users_file: PathBuf,
}

impl Config {
    pub fn from_env() -> IpechoResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> IpechoResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let readiness_threshold = parse_readiness_time(get("READINESS_TIME").as_deref());

        let address = match get("ADDRESS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| IpechoError::Config(format!("ADDRESS {raw:?} is invalid: {e}")))?,
            None => DEFAULT_ADDRESS
                .parse()
                .map_err(|e| IpechoError::Config(format!("default address is invalid: {e}")))?,
        };

        let auth_enabled = match get("AUTH_ENABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                IpechoError::Config(format!("AUTH_ENABLED {raw:?} is not a boolean"))
            })?,
            None => true,
        };

        let users_file = get("USERS_FILE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USERS_FILE.into())
            .into();

        Ok(Self {
            address,
            readiness_threshold,
            auth_enabled,
            users_file,
        })
    }
}

/// Parse `READINESS_TIME` as whole seconds. Absent, negative or otherwise
/// unparsable values fall back to [`DEFAULT_READINESS_SECS`].
pub fn parse_readiness_time(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_READINESS_SECS);
    Duration::from_secs(secs)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
