use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use axis_billing::api::{AppState, create_router};
use axis_billing::config::{ConfigLoader, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = ConfigLoader::load(&settings.config_dir)?;
    info!(
        config_dir = %settings.config_dir.display(),
        engine_version = %config.metadata().version,
        presets = config.config().presets().len(),
        units = config.units().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(bind_addr = %settings.bind_addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
