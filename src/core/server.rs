//! Integrated server service that coordinates sessions, rooms and storage

use std::sync::Arc;
use tokio::sync::mpsc;
use warp::ws::Message as WsMessage;

use crate::config::{ServerConfig, StorageBackend};
use crate::core::broadcast::Broadcaster;
use crate::core::coordinator::SessionCoordinator;
use crate::core::message_types::ServerMessage;
use crate::core::room::{normalize_room_id, RoomRegistry};
use crate::core::session::{create_session_manager, Sessions};
use crate::error::Result;
use crate::storage::{FileSnapshotStore, MemorySnapshotStore, RoomSnapshot, SnapshotStore};

/// Process-wide state shared by every connection
pub struct ServerManager {
    rooms: Arc<RoomRegistry>,
    sessions: Sessions,
    store: Arc<dyn SnapshotStore>,
    max_message_size: usize,
}

impl ServerManager {
    /// Create a server manager around a snapshot store
    pub fn new(store: Arc<dyn SnapshotStore>, max_message_size: usize) -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::new()),
            sessions: create_session_manager(),
            store,
            max_message_size,
        }
    }

    /// Create with the storage backend named in the configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        let store: Arc<dyn SnapshotStore> = match config.storage_backend {
            StorageBackend::File => Arc::new(FileSnapshotStore::new(config.storage_dir.clone())),
            StorageBackend::Memory => Arc::new(MemorySnapshotStore::new()),
        };
        Self::new(store, config.max_message_size)
    }

    pub fn rooms(&self) -> &Arc<RoomRegistry> {
        &self.rooms
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Register a socket's outbound channel, returning its connection id
    pub fn register_connection(&self, sender: mpsc::UnboundedSender<WsMessage>) -> Result<String> {
        self.sessions.register(sender)
    }

    /// Forget a socket. Room membership is handled by its coordinator.
    pub fn unregister_connection(&self, connection_id: &str) {
        match self.sessions.unregister(connection_id) {
            Ok(Some(connection)) => log::debug!(
                "Connection {} unregistered after {:?}",
                connection_id,
                connection.connection_duration()
            ),
            Ok(None) => log::warn!("Connection {} was not registered", connection_id),
            Err(e) => log::error!("Error unregistering client {}: {}", connection_id, e),
        }
    }

    /// Protocol handler for one registered connection
    pub fn coordinator(&self, connection_id: &str) -> SessionCoordinator {
        let broadcaster: Arc<dyn Broadcaster> = self.sessions.clone();
        SessionCoordinator::new(
            connection_id.to_string(),
            Arc::clone(&self.rooms),
            broadcaster,
            self.max_message_size,
        )
    }

    /// Write the room's current history and members to the store.
    ///
    /// A room nobody has joined yet is saved as an empty snapshot without
    /// being added to the registry.
    pub async fn save_room(&self, room_id: &str) -> Result<String> {
        let id = normalize_room_id(room_id).to_string();
        let snapshot = match self.rooms.get(&id).await {
            Some(room) => {
                let room = room.lock().await;
                RoomSnapshot {
                    history: room.log.snapshot(),
                    users: room.members().to_vec(),
                }
            }
            None => RoomSnapshot::default(),
        };

        match self.store.save(&id, &snapshot).await {
            Ok(location) => {
                log::info!(
                    "Saved room {} ({} operations) to {}",
                    id,
                    snapshot.history.len(),
                    location
                );
                Ok(location)
            }
            Err(e) => {
                log::error!("Save error for room {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Replace the room's history with the stored snapshot and resync members.
    ///
    /// The room is left untouched if the snapshot cannot be loaded.
    pub async fn load_room(&self, room_id: &str) -> Result<String> {
        let id = normalize_room_id(room_id).to_string();

        let snapshot = match self.store.load(&id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Load error for room {}: {}", id, e);
                return Err(e);
            }
        };

        let room = self.rooms.get_or_create(&id).await;
        let mut room = room.lock().await;
        room.log.replace(snapshot.history);
        let sent = self.sessions.multicast(
            &room.member_ids(),
            &ServerMessage::History {
                history: room.log.snapshot(),
            },
        );
        log::info!(
            "Loaded room {} ({} operations), resynced {} members",
            id,
            room.log.len(),
            sent
        );

        Ok(id)
    }
}

// Shared reference to server manager
pub type SharedServerManager = Arc<ServerManager>;
