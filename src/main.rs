//! Lost & Found - a small bulletin board for lost and found item reports.

use std::net::SocketAddr;

use anyhow::Context;
use lostfound::{api, config, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lostfound=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::init();
    tracing::info!(
        "Starting Lost & Found on {}:{}",
        config.server.host,
        config.server.port
    );

    let state = AppState::new(&config.storage)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!(
        data_file = %config.storage.data_file.display(),
        upload_dir = %config.storage.upload_dir.display(),
        "Application state initialized"
    );

    api::status::init_startup_time();

    let app = api::app(state, config.storage.max_upload_size);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid address {}", config.bind_addr()))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
