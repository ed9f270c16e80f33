//! Graceful shutdown on Ctrl+C / SIGTERM.

use tokio::signal;

use crate::usecase::CoordinatorHandle;

/// Wait for a termination signal, then close the room.
///
/// Every client receives the shutdown notice and has its outbound queue
/// closed before the HTTP server stops accepting requests.
pub async fn shutdown_signal(coordinator: CoordinatorHandle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, closing the room");
    if let Err(e) = coordinator.shutdown().await {
        tracing::warn!("Room could not be closed cleanly: {}", e);
    }
}
