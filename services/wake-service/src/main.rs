use anyhow::Result;
use common::telemetry::OpentelemetryHandler;
use wake_service::application::SERVICE_IDENTITY;
use wake_service::application::config::Config;
use wake_service::application::context::create_application_state;
use wake_service::application::context::start_application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the OpenTelemetry stack
    let _opentelemetry_handler = OpentelemetryHandler::new(SERVICE_IDENTITY)?;

    let config = Config::from_env()?;
    tracing::debug!("Loaded configuration: {config:?}");

    // Start the application
    let application_state = create_application_state(config)?;
    start_application(&application_state, common::shutdown::shutdown_token()).await?;

    Ok(())
}
