//! WebSocket connection handler.
//!
//! Each socket gets a bounded outbound queue registered with the
//! coordinator, a writer task draining that queue and a reader task
//! forwarding input lines.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ChatEvent,
    ui::state::{AppState, SessionGuard},
};

/// Capacity of each connection's outbound queue
pub const OUTBOUND_QUEUE_CAPACITY: usize = 16;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, remote))
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The task ends when the coordinator closes the queue or a write fails.
/// A close frame is sent in the first case so the client sees the
/// disconnect immediately.
///
/// # Arguments
///
/// * `rx` - Receiving side of this connection's outbound queue
/// * `sender` - WebSocket sink to send events to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<ChatEvent>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to serialize chat event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, remote: SocketAddr) {
    let _session = SessionGuard::new(&state.connections);

    let (queue, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    let user_id = match state.coordinator.register(queue, remote).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to register connection from {}: {}", remote, e);
            return;
        }
    };

    let (sender, mut receiver) = socket.split();
    let coordinator = state.coordinator.clone();

    // Spawn a task to forward lines from this client to the coordinator
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error from client {}: {}", user_id, e);
                    break;
                }
            };

            let payload = match msg {
                Message::Text(text) => text.to_string(),
                Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => text,
                    Err(_) => {
                        tracing::debug!("Dropping non UTF-8 frame from client {}", user_id);
                        continue;
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("Client {} requested close", user_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => continue,
            };

            if coordinator.incoming(user_id, payload).await.is_err() {
                break;
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.coordinator.unregister(user_id).await {
        tracing::debug!("Could not unregister client {}: {}", user_id, e);
    }
}
