use flowdex_server::{config::ServerConfig, router, state::AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env()?;
    tracing::info!(
        workflows_dir = %config.workflows_dir.display(),
        active_policy = ?config.active_policy,
        "Loaded configuration"
    );

    // Build the catalog before accepting requests
    let state = AppState::from_config(&config);
    let summary = state
        .catalog
        .rebuild()
        .map_err(|report| report.to_string())?;
    for failure in &summary.failures {
        tracing::warn!(filename = %failure.filename, error = %failure.message, "Skipped workflow");
    }

    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
