//! WebSocket connection handling
//!
//! Each connection gets an outbound mailbox from the registry and a forward
//! task draining it onto the socket. The inbound loop decodes typed
//! `ClientEvent` frames and hands them to the relay; frames that fail schema
//! validation are logged and dropped, never answered. Connection teardown
//! (client close, transport error, or heartbeat timeout) unregisters the
//! connection from every room.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use bugbash_common::protocol::ClientEvent;

use super::server::AppContext;
use crate::registry::RoomRegistry;
use crate::relay;

/// GET /ws - WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(ctx): State<AppContext>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, ctx.registry))
}

/// Service one WebSocket connection until it closes
async fn handle_socket(socket: WebSocket, registry: Arc<RoomRegistry>) {
    let (conn, mut mailbox) = registry.register();
    info!("WebSocket connection {} established", conn);

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Forward relayed events from the registry mailbox to the socket
    let send_task = tokio::spawn(async move {
        while let Some(event) = mailbox.recv().await {
            let json = match event.encode() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize {}: {}", event.event_name(), e);
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json)).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Inbound loop. Ping/pong is answered at the transport layer; a dead
    // connection surfaces here as a stream error or end-of-stream.
    while let Some(result) = ws_rx.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                debug!("Connection {} sent close frame", conn);
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("WebSocket error on {}: {}", conn, e);
                break;
            }
        };

        match ClientEvent::decode(&text) {
            Ok(event) => relay::dispatch(&registry, Some(conn), event),
            Err(e) => {
                // Silent-failure contract: sender gets no error reply
                warn!("Dropping malformed frame from {}: {}", conn, e);
            }
        }
    }

    registry.unregister(conn);
    send_task.abort();
    info!("WebSocket connection {} closed", conn);
}
