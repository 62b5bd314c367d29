//! Storage backends for saving and restoring room snapshots

pub mod file;
pub mod memory;
pub mod traits;

// Re-export the store types
pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
pub use traits::{RoomSnapshot, SnapshotStore};
