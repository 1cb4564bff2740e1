//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: a receive loop that decodes and dispatches
//! client envelopes, and a writer that drains the connection's outbox into the
//! socket. When either finishes the other is aborted and the connection is
//! deregistered.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, ConnectionRepository, MessageContent, RoomId},
    infrastructure::dto::websocket::Inbound,
    ui::state::AppState,
    usecase::{
        DisconnectConnectionUseCase, JoinRoomUseCase, RegisterConnectionUseCase,
        SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Create a bounded queue for messages addressed to this connection
    let (outbox, mut rx) = mpsc::channel::<String>(state.outbox_capacity);

    RegisterConnectionUseCase::new(state.repository.clone())
        .execute(connection_id, outbox)
        .await;
    let registration = Registration::new(connection_id, state.repository.clone());
    tracing::info!(connection_id = %connection_id, "Connection registered");

    let (mut sender, mut receiver) = socket.split();

    let recv_state = state.clone();

    // Spawn a task to receive envelopes from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&recv_state, connection_id, text.as_str()).await;
                }
                Message::Binary(bytes) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        len = bytes.len(),
                        "Ignoring binary frame"
                    );
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(connection_id = %connection_id, "Client requested close");
                    break;
                }
            }
        }
    });

    // Spawn a task to forward queued messages to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match registration.release().await {
        Some(rooms) => {
            tracing::info!(
                connection_id = %connection_id,
                rooms = rooms.len(),
                "Connection closed and deregistered"
            );
        }
        None => {
            tracing::debug!(connection_id = %connection_id, "Connection was already deregistered");
        }
    }
}

/// Decode one text frame and run the matching use case.
///
/// Undecodable frames and unknown envelope types are logged and dropped; the
/// connection stays open.
async fn dispatch(state: &AppState, connection_id: ConnectionId, text: &str) {
    match Inbound::decode(text) {
        Ok(Inbound::Join(payload)) => {
            JoinRoomUseCase::new(state.repository.clone())
                .execute(connection_id, RoomId::from(payload.room_id))
                .await;
        }
        Ok(Inbound::Chat(payload)) => {
            let room_id = RoomId::from(payload.room_id);
            let content = MessageContent::from(payload.message);
            tracing::debug!(
                connection_id = %connection_id,
                room_id = %room_id,
                len = content.len(),
                empty = content.is_empty(),
                "Received chat"
            );
            SendMessageUseCase::new(state.repository.clone())
                .execute(connection_id, room_id, content)
                .await;
        }
        Ok(Inbound::Unrecognized(kind)) => {
            tracing::warn!(
                connection_id = %connection_id,
                "Ignoring envelope with unknown type '{}'",
                kind
            );
        }
        Err(e) => {
            tracing::warn!(connection_id = %connection_id, "Ignoring frame: {}", e);
        }
    }
}

/// Keeps a connection deregistered on every exit path.
///
/// `release` deregisters inline. If the handler future is dropped before
/// that completes, `Drop` hands the deregistration to the runtime instead.
struct Registration {
    connection_id: ConnectionId,
    repository: Option<Arc<dyn ConnectionRepository>>,
}

impl Registration {
    fn new(connection_id: ConnectionId, repository: Arc<dyn ConnectionRepository>) -> Self {
        Self {
            connection_id,
            repository: Some(repository),
        }
    }

    async fn release(mut self) -> Option<Vec<RoomId>> {
        let repository = self.repository.clone()?;
        let rooms = DisconnectConnectionUseCase::new(repository)
            .execute(self.connection_id)
            .await;
        self.repository = None;
        rooms
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(repository) = self.repository.take() else {
            return;
        };
        let connection_id = self.connection_id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    DisconnectConnectionUseCase::new(repository)
                        .execute(connection_id)
                        .await;
                });
            }
            Err(_) => {
                tracing::warn!(connection_id = %connection_id, "No runtime to deregister connection");
            }
        }
    }
}
