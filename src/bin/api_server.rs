// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the recommendation service
// Usage: cargo run --features api --bin api_server

use garden_advisor_rust::{create_router, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "garden_advisor_rust=info,tower_http=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = Config::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  ADVISOR_MODE: {:?}", config.advisor.mode);
    tracing::info!("  ADVISOR_URL: {}", config.advisor.model_url());
    tracing::info!("  ADVISOR_TIMEOUT: {:?}", config.advisor.timeout);

    let state = AppState::new(&config)?;

    // Advisor warms up in the background; rule-based advice is served meanwhile
    state.spawn_initialization();

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
