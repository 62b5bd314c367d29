use futures_util::sink::SinkExt;
use futures_util::stream::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use warp::ws::WebSocket;

use crate::core::server::SharedServerManager;

// Handle a WebSocket connection
pub async fn handle_ws_client(ws: WebSocket, server: SharedServerManager) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn a task to forward messages from our channel to the WebSocket
    tokio::task::spawn(async move {
        let mut rx = rx;
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_tx.send(message).await {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    let connection_id = match server.register_connection(tx) {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to register client: {}", e);
            return;
        }
    };
    info!(
        "Client connected: {} ({} connections)",
        connection_id,
        server.sessions().client_count()
    );

    let mut coordinator = server.coordinator(&connection_id);

    // Handle incoming messages; each one runs to completion before the next
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(msg) => {
                if msg.is_close() {
                    break;
                }
                // Only process text messages
                if let Ok(text) = msg.to_str() {
                    if let Err(e) = coordinator.handle_text(text).await {
                        warn!("Rejected message from {}: {}", connection_id, e);
                    }
                } else {
                    debug!("Ignoring non-text frame from {}", connection_id);
                }
            }
            Err(e) => {
                error!("WebSocket error for {}: {}", connection_id, e);
                break;
            }
        }
    }

    // Client disconnected
    coordinator.disconnect().await;
    server.unregister_connection(&connection_id);
    info!(
        "Client disconnected: {} ({} connections)",
        connection_id,
        server.sessions().client_count()
    );
}
