use anyhow::{Context, Result};
use clap::Parser;
use decant_core::Pipeline;
use decant_server::{AppState, ServerConfig, build_app, init_logging};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_format);

    let fetch_config = config.fetch_config()?;
    let pipeline = Pipeline::new(fetch_config).context("Failed to build HTTP client")?;
    let app = build_app(AppState::new(pipeline), &config);

    let listener = TcpListener::bind(config.listen).await.context("Failed to bind HTTP server")?;
    info!("decant API listening on http://{}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
