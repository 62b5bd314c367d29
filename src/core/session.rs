use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use warp::ws::Message as WsMessage;

use crate::core::broadcast::Broadcaster;
use crate::core::connection::Connection;
use crate::error::Result;

// Tracks every open socket by connection id
pub struct SessionManager {
    connections: RwLock<HashMap<String, Connection>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    // Register a new client connection under a fresh id
    pub fn register(&self, sender: mpsc::UnboundedSender<WsMessage>) -> Result<String> {
        let connection = Connection::new(sender);
        let id = connection.id.clone();
        self.connections.write()?.insert(id.clone(), connection);
        Ok(id)
    }

    // Remove a client connection, dropping its sender
    pub fn unregister(&self, id: &str) -> Result<Option<Connection>> {
        Ok(self.connections.write()?.remove(id))
    }

    // Get current clients count
    pub fn client_count(&self) -> usize {
        self.connections.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_connected(&self, id: &str) -> bool {
        self.connections
            .read()
            .map(|c| c.contains_key(id))
            .unwrap_or(false)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for SessionManager {
    fn send_text(&self, connection_id: &str, text: &str) -> bool {
        let connections = match self.connections.read() {
            Ok(guard) => guard,
            Err(e) => {
                log::error!("Failed to acquire sessions lock for send: {}", e);
                return false;
            }
        };

        match connections.get(connection_id) {
            Some(connection) => connection.send_text(text),
            None => {
                log::warn!("No open connection for {}", connection_id);
                false
            }
        }
    }
}

// Thread-safe session manager wrapper
pub type Sessions = Arc<SessionManager>;

// Create a new thread-safe session manager
pub fn create_session_manager() -> Sessions {
    Arc::new(SessionManager::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message_types::ServerMessage;

    #[test]
    fn test_register_and_unregister() {
        let sessions = create_session_manager();
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = sessions.register(tx).unwrap();
        assert!(sessions.is_connected(&id));
        assert_eq!(sessions.client_count(), 1);

        assert!(sessions.unregister(&id).unwrap().is_some());
        assert!(!sessions.is_connected(&id));
        assert!(sessions.unregister(&id).unwrap().is_none());
    }

    #[test]
    fn test_multicast_skips_unknown_and_closed() {
        let sessions = create_session_manager();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let id1 = sessions.register(tx1).unwrap();
        let id2 = sessions.register(tx2).unwrap();
        drop(rx2);

        let recipients = vec![id1.clone(), id2, "ghost".to_string()];
        let sent = sessions.multicast(&recipients, &ServerMessage::Clear);

        assert_eq!(sent, 1);
        assert_eq!(rx1.try_recv().unwrap().to_str().unwrap(), r#"{"type":"clear"}"#);
    }
}
