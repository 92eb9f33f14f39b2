use std::net::SocketAddr;

use ipecho_core::{Config, StartupClock};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::info;

use ipecho_server::{AppState, router, telemetry};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration; aborting startup");
            std::process::exit(1);
        }
    };

    let handle = PrometheusBuilder::new().install_recorder()?;

    let state = match AppState::from_config(&config, StartupClock::start()) {
        Ok(s) => s.with_metrics(handle),
        Err(e) => {
            tracing::error!(error = %e, "failed to load credentials; aborting startup");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.address,
        readiness_secs = config.readiness_threshold.as_secs(),
        auth_enabled = config.auth_enabled,
        users = state.credentials.as_ref().map_or(0, |c| c.len()),
        "configuration loaded"
    );

    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.address).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {e}", config.address);
            std::process::exit(1);
        }
    };
    info!(addr = %config.address, "starting HTTP server");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    );
    if let Err(e) = server
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to install ctrl+c handler: {e}");
            }
        })
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
