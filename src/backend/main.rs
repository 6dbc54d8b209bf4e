/**
 * devconnect Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration and serves the
 * API until the process is stopped.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = devconnect::shared::AppConfig::from_env()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    let app = devconnect::backend::server::create_app(&config).await?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
