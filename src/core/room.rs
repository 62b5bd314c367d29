use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::constants::{COLOR_PALETTE, DEFAULT_ROOM_ID, DEFAULT_USERNAME};
use crate::core::operation_log::OperationLog;

/// A connection that has joined a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Connection identity
    pub id: String,
    /// Display name chosen at join time
    pub name: String,
    /// Color from the shared palette
    pub color: String,
}

/// An isolated drawing session
#[derive(Debug)]
pub struct Room {
    /// Identifier clients use to join
    pub id: String,
    /// Members in join order
    members: Vec<Member>,
    /// Shared drawing history
    pub log: OperationLog,
}

impl Room {
    /// Creates an empty room with the given id
    pub fn new(id: String) -> Self {
        Self {
            id,
            members: Vec::new(),
            log: OperationLog::new(),
        }
    }

    /// Adds a member and assigns its color.
    ///
    /// The color is picked by current member count, so members who leave
    /// and rejoin can end up sharing a color.
    pub fn add_member(&mut self, connection_id: String, name: &str) -> Member {
        let color = COLOR_PALETTE[self.members.len() % COLOR_PALETTE.len()];
        let name = match name.trim() {
            "" => DEFAULT_USERNAME,
            trimmed => trimmed,
        };
        let member = Member {
            id: connection_id,
            name: name.to_string(),
            color: color.to_string(),
        };

        self.members.retain(|m| m.id != member.id);
        self.members.push(member.clone());
        member
    }

    /// Removes a member from the room
    pub fn remove_member(&mut self, connection_id: &str) -> Option<Member> {
        let index = self.members.iter().position(|m| m.id == connection_id)?;
        Some(self.members.remove(index))
    }

    /// Checks if a connection is a member of the room
    pub fn has_member(&self, connection_id: &str) -> bool {
        self.members.iter().any(|m| m.id == connection_id)
    }

    /// Members in join order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Connection ids of every member
    pub fn member_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    /// Returns the number of members in the room
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// A room behind its own lock; all mutation of one room is serialized on it
pub type SharedRoom = Arc<Mutex<Room>>;

/// Maps room ids to rooms. Rooms are created on first use and kept for the
/// life of the process.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, SharedRoom>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a room, creating an empty one if it does not exist yet
    pub async fn get_or_create(&self, room_id: &str) -> SharedRoom {
        let room_id = normalize_room_id(room_id);

        if let Some(room) = self.rooms.read().await.get(room_id) {
            return Arc::clone(room);
        }

        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            log::info!("Creating room {}", room_id);
            Arc::new(Mutex::new(Room::new(room_id.to_string())))
        });
        Arc::clone(room)
    }

    /// Looks up a room without creating it
    pub async fn get(&self, room_id: &str) -> Option<SharedRoom> {
        self.rooms
            .read()
            .await
            .get(normalize_room_id(room_id))
            .cloned()
    }

    /// Number of rooms created so far
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Ids of every known room
    pub async fn room_ids(&self) -> Vec<String> {
        self.rooms.read().await.keys().cloned().collect()
    }
}

/// Blank room ids map to the default room
pub fn normalize_room_id(room_id: &str) -> &str {
    let trimmed = room_id.trim();
    if trimmed.is_empty() {
        DEFAULT_ROOM_ID
    } else {
        trimmed
    }
}
