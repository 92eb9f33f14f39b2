use std::sync::Arc;
use std::time::Duration;

use ipecho_core::{Config, CredentialStore, IpechoError, Readiness, StartupClock};
use metrics_exporter_prometheus::PrometheusHandle;

/// Immutable state shared by every handler. Built once before serving.
#[derive(Clone)]
pub struct AppState {
    pub clock: StartupClock,
    pub readiness_threshold: Duration,
    /// `None` when Basic auth is disabled.
    pub credentials: Option<Arc<CredentialStore>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(clock: StartupClock, readiness_threshold: Duration) -> Self {
        Self {
            clock,
            readiness_threshold,
            credentials: None,
            metrics: None,
        }
    }

    /// Build state from configuration, loading the credential file when auth
    /// is enabled.
    pub fn from_config(config: &Config, clock: StartupClock) -> Result<Self, IpechoError> {
        let state = Self::new(clock, config.readiness_threshold);
        if !config.auth_enabled {
            return Ok(state);
        }
        let store = CredentialStore::load(&config.users_file)?;
        Ok(state.with_credentials(store))
    }

    pub fn with_credentials(mut self, store: CredentialStore) -> Self {
        self.credentials = Some(Arc::new(store));
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn readiness(&self) -> Readiness {
        Readiness::evaluate(self.clock.elapsed(), self.readiness_threshold)
    }
}
