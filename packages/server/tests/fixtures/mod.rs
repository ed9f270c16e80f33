//! In-process server fixture for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use snakk_server::{
    domain::{ChatEvent, IdentityRegistry},
    ui::{AppState, build_router},
    usecase::{Coordinator, CoordinatorHandle},
};
use snakk_shared::time::{Clock, SystemClock};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A server running on an ephemeral port of 127.0.0.1
pub struct TestServer {
    pub addr: SocketAddr,
    pub coordinator: CoordinatorHandle,
    server_task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(history_capacity: usize) -> Self {
        Self::start_with_auth(history_capacity, None).await
    }

    pub async fn start_with_auth(
        history_capacity: usize,
        basic_auth: Option<(String, String)>,
    ) -> Self {
        let registry = Arc::new(IdentityRegistry::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let (coordinator, _coordinator_task) =
            Coordinator::new(history_capacity, registry.clone(), clock.clone()).start();

        let state = AppState::new(
            coordinator.clone(),
            registry,
            clock,
            history_capacity,
            basic_auth,
        );
        let app = build_router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let server_task = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        TestServer {
            addr,
            coordinator,
            server_task,
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

/// A WebSocket chat client speaking the JSON protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the two welcome lines
    pub async fn connect(server: &TestServer) -> Self {
        let mut client = Self::connect_raw(server).await;
        client.recv().await;
        client.recv().await;
        client
    }

    pub async fn connect_raw(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    /// Connect and claim a nickname, consuming the confirmation
    pub async fn join(server: &TestServer, nick: &str) -> Self {
        let mut client = Self::connect(server).await;
        client.send(&format!("/nick {}", nick)).await;
        let confirmation = client.recv().await;
        assert_eq!(confirmation.message, format!("You are now known as {}", nick));
        client
    }

    pub async fn send(&mut self, line: &str) {
        self.stream
            .send(Message::Text(line.into()))
            .await
            .expect("Failed to send");
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) {
        self.stream
            .send(Message::Binary(bytes.into()))
            .await
            .expect("Failed to send");
    }

    /// Next chat event; panics on timeout or close
    pub async fn recv(&mut self) -> ChatEvent {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for an event")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).expect("Invalid chat event JSON");
            }
        }
    }

    /// Next event, or `None` if nothing arrives within `wait`
    pub async fn try_recv(&mut self, wait: Duration) -> Option<ChatEvent> {
        match tokio::time::timeout(wait, self.stream.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => serde_json::from_str(&text).ok(),
            _ => None,
        }
    }

    /// Wait until the server closes the connection
    pub async fn expect_closed(&mut self) {
        let closed = tokio::time::timeout(RECV_TIMEOUT, async {
            while let Some(msg) = self.stream.next().await {
                match msg {
                    Ok(Message::Close(_)) | Err(_) => return,
                    Ok(_) => continue,
                }
            }
        })
        .await;
        assert!(closed.is_ok(), "Connection was not closed by the server");
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
