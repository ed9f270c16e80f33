//! Server execution logic.

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, middleware, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        favicon, health_check, list_users, require_basic_auth, robots_txt, room_page,
        room_snapshot, status, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()`; the
/// WebSocket handler needs the peer address.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(room_page))
        .route("/favicon.ico", get(favicon))
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/users", get(list_users))
        .route("/api/room", get(room_snapshot))
        .route("/.status", get(status))
        .route("/api/health", get(health_check))
        .route("/robots.txt", get(robots_txt));

    let router = if state.basic_auth.is_some() {
        router.layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("0.0.0.0", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("snakk server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        if self.state.basic_auth.is_some() {
            tracing::info!("HTTP basic authentication is enabled");
        }

        let coordinator = self.state.coordinator.clone();
        let app = build_router(self.state);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal(coordinator))
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
