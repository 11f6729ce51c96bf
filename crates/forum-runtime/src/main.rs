//! Forum core service entry point.

use anyhow::Result;
use forum_runtime::{spawn_handlers, AppContainer, RuntimeConfig};
use forum_telemetry::{init_tracing, register_metrics, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_tracing(&telemetry)?;
    register_metrics()?;

    let config = RuntimeConfig::from_env();
    let container = AppContainer::build(&config);
    let handlers = spawn_handlers(&container);

    info!(service = %telemetry.service_name, "Forum core running");

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    for handle in handlers {
        handle.abort();
    }

    Ok(())
}
