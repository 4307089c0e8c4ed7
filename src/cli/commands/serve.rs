use anyhow::Context;
use tokio::signal;
use tracing::info;

use crate::database::DatabaseManager;
use crate::router;
use crate::state::AppState;

pub async fn handle(port: Option<u16>, migrate: bool) -> anyhow::Result<()> {
    let (mut config, pool) = super::connect().await?;
    if let Some(port) = port {
        config.server.port = port;
    }

    if migrate {
        DatabaseManager::migrate(&pool).await?;
    }

    info!("Starting {} in {:?} mode", env!("CARGO_PKG_NAME"), config.environment);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::from_pool(config, pool.clone())?;
    let app = router::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down server...");
    DatabaseManager::close(pool).await;
    info!("Server exited gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
