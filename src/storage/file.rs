//! File-backed snapshot storage
//!
//! One pretty-printed JSON document per room at `<dir>/<room_id>.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::traits::*;
use crate::error::{Result, RustyCanvasError};

pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the snapshot path, refusing ids that would escape `dir`
    fn path_for(&self, room_id: &str) -> Result<PathBuf> {
        if room_id.is_empty()
            || room_id.starts_with('.')
            || room_id.contains(['/', '\\', '\0'])
        {
            return Err(RustyCanvasError::ValidationError(format!(
                "Room id cannot be used as a file name: {:?}",
                room_id
            )));
        }
        Ok(self.dir.join(format!("{}.json", room_id)))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, room_id: &str, snapshot: &RoomSnapshot) -> Result<String> {
        let path = self.path_for(room_id)?;
        let data = serde_json::to_vec_pretty(snapshot)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, data).await?;

        Ok(path.display().to_string())
    }

    async fn load(&self, room_id: &str) -> Result<RoomSnapshot> {
        let path = self.path_for(room_id)?;

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RustyCanvasError::SnapshotNotFound(room_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&raw)?)
    }
}
