//! Shared helpers for integration tests.
//!
//! `TestServer` serves the real router on an ephemeral port inside the test's
//! runtime. `TestClient` is a thin tokio-tungstenite client speaking the
//! relay's envelope protocol.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use roomcast_server::{
    domain::{ConnectionRepository, RoomId},
    infrastructure::repository::InMemoryConnectionRepository,
    ui::{serve, state::AppState},
};
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long to wait before concluding that nothing will arrive
pub const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Upper bound for anything that is expected to happen
pub const EVENTUALLY: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    repository: Arc<InMemoryConnectionRepository>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_capacity(64).await
    }

    pub async fn start_with_capacity(outbox_capacity: usize) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let repository = Arc::new(InMemoryConnectionRepository::new());
        let state = Arc::new(AppState::new(repository.clone(), outbox_capacity));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = serve(listener, state, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            addr,
            repository,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/", self.addr)
    }

    /// Wait until `room` has exactly `expected` members.
    pub async fn wait_for_members(&self, room: &str, expected: usize) {
        let room_id = RoomId::new(room);
        let result = tokio::time::timeout(EVENTUALLY, async {
            loop {
                if self.repository.room_members(&room_id).await.len() == expected {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(
            result.is_ok(),
            "room '{room}' never reached {expected} members"
        );
    }

    /// Wait until exactly `expected` connections are registered.
    pub async fn wait_for_connections(&self, expected: usize) {
        let result = tokio::time::timeout(EVENTUALLY, async {
            loop {
                if self.repository.count_connections().await == expected {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(result.is_ok(), "never reached {expected} connections");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _response) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        Self { stream }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send");
    }

    pub async fn join(&mut self, room: &str) {
        let envelope = serde_json::json!({"type": "join", "payload": {"roomId": room}});
        self.send_text(&envelope.to_string()).await;
    }

    pub async fn chat(&mut self, room: &str, message: &str) {
        let envelope = serde_json::json!({
            "type": "chat",
            "payload": {"roomId": room, "message": message}
        });
        self.send_text(&envelope.to_string()).await;
    }

    /// Next text frame, or `None` if nothing arrives within `wait`.
    pub async fn recv_text(&mut self, wait: Duration) -> Option<String> {
        let result = tokio::time::timeout(wait, async {
            while let Some(frame) = self.stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => return Some(text.to_string()),
                    Ok(Message::Close(_)) | Err(_) => return None,
                    Ok(_) => continue,
                }
            }
            None
        })
        .await;
        result.unwrap_or(None)
    }

    /// Next text frame; panics if none arrives.
    pub async fn expect_text(&mut self) -> String {
        self.recv_text(EVENTUALLY)
            .await
            .expect("Expected a text frame")
    }

    /// Assert that no text frame arrives during the quiet period.
    pub async fn expect_silence(&mut self) {
        let received = self.recv_text(QUIET_PERIOD).await;
        assert!(received.is_none(), "unexpected frame: {received:?}");
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
