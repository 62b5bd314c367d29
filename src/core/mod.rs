//! Core functionality for the drawing server

pub mod broadcast;
pub mod connection;
pub mod coordinator;
pub mod message_types;
pub mod operation;
pub mod operation_log;
pub mod room;
pub mod server;
pub mod session;

// Re-export main components for convenience
pub use broadcast::Broadcaster;
pub use connection::Connection;
pub use coordinator::SessionCoordinator;
pub use message_types::{ClientMessage, ServerMessage};
pub use operation::{Operation, OperationKind, Point, StrokeData};
pub use operation_log::OperationLog;
pub use room::{Member, Room, RoomRegistry, SharedRoom};
pub use server::{ServerManager, SharedServerManager};
pub use session::{create_session_manager, SessionManager, Sessions};
