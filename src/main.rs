use anyhow::Result;
use eligibility_gate::{start_web_server, EnvironmentConfig};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("ROCKET_PORT")
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT environment variable not set"))?
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;

    let profile_service_url = std::env::var("PROFILE_SERVICE_URL")
        .map_err(|_| anyhow::anyhow!("PROFILE_SERVICE_URL environment variable not set"))?;

    let jwt_secret = std::env::var("APPLYGATE_JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("APPLYGATE_JWT_SECRET environment variable not set"))?;

    let config = EnvironmentConfig::load()?;
    config.ensure_directories().await?;

    info!("Starting applygate eligibility API server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Database: {}", config.database_path.display());
    info!("Profile service: {}", profile_service_url);
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(config.database_path, port, profile_service_url, jwt_secret).await
}
