mod signal;
mod store;

use hookfeed_config::constants;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config_path = std::env::var("HOOKFEED_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(constants::DEFAULT_CONFIG_PATH));
    let config = hookfeed_config::load_config(&config_path).await?.apply_env();

    let store = store::open_store(&config).await?;

    let webhook_router = hookfeed_webhook::router(hookfeed_webhook::WebhookConfig {
        store: store.clone(),
        max_body_bytes: config.max_body_bytes,
    });
    let app = hookfeed_api::router(store).merge(webhook_router);

    let api_addr = config.bind_addr();
    tracing::info!("Starting API server on {api_addr}");
    let listener = TcpListener::bind(&api_addr).await?;

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await
    });

    tokio::select! {
        result = &mut server_handle => {
            // Server exited without being asked to
            result??;
            return Ok(());
        }
        _ = signal::shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(constants::SHUTDOWN_TIMEOUT, server_handle).await {
        Ok(Ok(Ok(()))) => tracing::info!("API server shut down gracefully"),
        Ok(Ok(Err(e))) => tracing::error!("API server failed: {}", e),
        Ok(Err(e)) => tracing::error!("API server task failed: {}", e),
        Err(_) => tracing::warn!("Shutdown timeout reached, forcing exit"),
    }

    tracing::info!("Hookfeed shutdown complete");

    Ok(())
}
