//! In-memory snapshot storage for development and testing
//!
//! Snapshots are kept in a map and lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::*;
use crate::error::{Result, RustyCanvasError};

#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<HashMap<String, RoomSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(&self, room_id: &str, snapshot: &RoomSnapshot) -> Result<String> {
        self.snapshots
            .write()
            .await
            .insert(room_id.to_string(), snapshot.clone());
        Ok(format!("memory:{}", room_id))
    }

    async fn load(&self, room_id: &str) -> Result<RoomSnapshot> {
        self.snapshots
            .read()
            .await
            .get(room_id)
            .cloned()
            .ok_or_else(|| RustyCanvasError::SnapshotNotFound(room_id.to_string()))
    }
}
