//! Message types for room-based drawing sessions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::operation::{Operation, Point, StrokeData};
use crate::core::room::Member;
use crate::error::Result;

/// Client-to-server message types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Join a room under a display name
    Join {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        username: String,
    },

    /// Commit a finished stroke
    Stroke(StrokeData),

    /// Undo the last operation in the room
    Undo,

    /// Redo the last undone operation in the room
    Redo,

    /// Wipe the room's canvas
    Clear,

    /// Pointer position, relayed to the other members only
    Cursor { cursor: Point },

    /// Latency probe, echoed back unchanged
    Ping { t: serde_json::Value },
}

/// Server-to-client message types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Current state for a member that just joined
    Init {
        users: Vec<Member>,
        history: Vec<Operation>,
    },

    /// Another member joined the room
    UserJoined(Member),

    /// A member left the room
    UserLeft { user_id: String },

    /// A stroke was committed
    Stroke { op: Operation },

    /// Full history resync, sent after every mutation
    History { history: Vec<Operation> },

    /// An operation was undone
    Undo { op_id: Uuid },

    /// An operation was redone
    Redo { op: Operation },

    /// The canvas was wiped
    Clear,

    /// Another member's pointer moved
    Cursor { user_id: String, cursor: Point },

    /// Reply to a ping
    Pong { t: serde_json::Value },

    /// Malformed or rejected frame
    Error { code: String, message: String },
}

impl ServerMessage {
    /// Serialize to a JSON text frame
    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Shorthand for an error reply
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
