//! HTTP server: router construction and the serve loop.

mod routes;

pub use routes::{create_router, AppState};

use tracing::info;

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let router = create_router(state);
    let addr = format!("0.0.0.0:{port}");

    info!("glowd listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                    - Service banner");
    info!("  GET  /health              - Health check");
    info!("  GET  /api/v1/color        - Latest mentioned color");
    info!("  GET  /api/v1/mentions     - Recent mentions, markup stripped");
    info!("  GET  /api/v1/platforms    - Available platforms");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = sigint.recv() => info!("Received SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("Ctrl+C handler");
        info!("Received Ctrl+C");
    }
}
