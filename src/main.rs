//! CodeArena - Application Entry Point
//!
//! This is the main entry point for the CodeArena judge server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codearena::{create_router, judge, AppState, Config, JudgeService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeArena judge server...");

    // Prepare the scratch area used by local judging
    judge::init_workspace(&config.judge.workspace_dir).await?;

    let judge = JudgeService::from_config(&config.judge)?;
    tracing::info!("Judging mode: {}", judge.mode());

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state and build the router
    let state = AppState::new(judge);
    let app = create_router(state);

    // Start the server
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
