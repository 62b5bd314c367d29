//! Abstract storage interface for room snapshots
//!
//! The drawing core only needs two things from persistence: hand over the
//! current state of a room, and get a previously saved state back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::operation::Operation;
use crate::core::room::Member;
use crate::error::Result;

/// Serialized state of one room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    #[serde(default)]
    pub history: Vec<Operation>,
    #[serde(default)]
    pub users: Vec<Member>,
}

/// Room snapshot storage interface
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot, returning where it was written
    async fn save(&self, room_id: &str, snapshot: &RoomSnapshot) -> Result<String>;

    /// Fetch the last saved snapshot for a room
    async fn load(&self, room_id: &str) -> Result<RoomSnapshot>;
}
