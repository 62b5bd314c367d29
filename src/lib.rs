//! Rusty Canvas - a real-time collaborative drawing server
//!
//! Clients join a named room over a WebSocket and share one canvas. The
//! server keeps the authoritative operation log per room, including a
//! single undo/redo cursor, and fans every change out to the room.

pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod handlers;
pub mod storage;

// Re-export main components
pub use config::*;
pub use constants::*;
