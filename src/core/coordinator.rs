//! Per-connection protocol logic
//!
//! A coordinator binds one socket to at most one room. Every intent that
//! touches a room runs under that room's lock, and the resulting events are
//! queued before the lock is released so all members see them in log order.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::core::broadcast::Broadcaster;
use crate::core::message_types::{ClientMessage, ServerMessage};
use crate::core::operation::{OperationKind, Point, StrokeData};
use crate::core::room::{RoomRegistry, SharedRoom};
use crate::error::{Result, RustyCanvasError};

/// Maps one connection's inbound intents onto its room
pub struct SessionCoordinator {
    connection_id: String,
    rooms: Arc<RoomRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
    /// Room joined by this connection, if any
    joined: Option<JoinedRoom>,
    max_message_size: usize,
}

struct JoinedRoom {
    id: String,
    room: SharedRoom,
}

impl SessionCoordinator {
    pub fn new(
        connection_id: String,
        rooms: Arc<RoomRegistry>,
        broadcaster: Arc<dyn Broadcaster>,
        max_message_size: usize,
    ) -> Self {
        Self {
            connection_id,
            rooms,
            broadcaster,
            joined: None,
            max_message_size,
        }
    }

    /// Id of the joined room, if any
    pub fn room_id(&self) -> Option<&str> {
        self.joined.as_ref().map(|j| j.id.as_str())
    }

    /// Parse and dispatch one text frame.
    ///
    /// Oversized or malformed frames are answered with an `error` event and
    /// reported to the caller; the connection stays usable.
    pub async fn handle_text(&mut self, text: &str) -> Result<()> {
        if text.len() > self.max_message_size {
            self.reply(&ServerMessage::error(
                "MESSAGE_TOO_LARGE",
                format!("Message exceeds {} bytes", self.max_message_size),
            ));
            return Err(RustyCanvasError::MessageTooLarge(text.len()));
        }

        let message: ClientMessage = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(e) => {
                self.reply(&ServerMessage::error("INVALID_MESSAGE", e.to_string()));
                return Err(RustyCanvasError::MessageParseError(e.to_string()));
            }
        };

        self.handle(message).await;
        Ok(())
    }

    /// Dispatch a parsed intent
    pub async fn handle(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::Join { room_id, username } => self.join(&room_id, &username).await,
            ClientMessage::Stroke(stroke) => self.stroke(stroke).await,
            ClientMessage::Undo => self.undo().await,
            ClientMessage::Redo => self.redo().await,
            ClientMessage::Clear => self.clear().await,
            ClientMessage::Cursor { cursor } => self.cursor(cursor).await,
            ClientMessage::Ping { t } => self.ping(t),
        }
    }

    /// Register this connection in a room and send it the current state
    pub async fn join(&mut self, room_id: &str, username: &str) {
        if let Some(joined) = &self.joined {
            debug!(
                "Ignoring join from {}: already in room {}",
                self.connection_id, joined.id
            );
            return;
        }

        let room = self.rooms.get_or_create(room_id).await;
        let id = {
            let mut guard = room.lock().await;
            let member = guard.add_member(self.connection_id.clone(), username);

            self.reply(&ServerMessage::Init {
                users: guard.members().to_vec(),
                history: guard.log.snapshot(),
            });
            self.broadcaster.multicast_except(
                &guard.member_ids(),
                Some(&self.connection_id),
                &ServerMessage::UserJoined(member.clone()),
            );

            info!(
                "User join: {} -> room {} ({}), {} members",
                self.connection_id,
                guard.id,
                member.name,
                guard.member_count()
            );
            guard.id.clone()
        };

        self.joined = Some(JoinedRoom { id, room });
    }

    /// Append a stroke and fan it out with the new history
    pub async fn stroke(&mut self, stroke: StrokeData) {
        let Some(joined) = &self.joined else {
            debug!("Dropping stroke from {}: not in a room", self.connection_id);
            return;
        };

        if !stroke.is_drawable() {
            debug!(
                "Dropping empty stroke from {} in {}",
                self.connection_id, joined.id
            );
            return;
        }

        let mut room = joined.room.lock().await;
        let point_count = stroke.points.len();
        let op = room
            .log
            .append(&self.connection_id, OperationKind::Stroke(stroke));
        debug!(
            "Stroke {} from {} in {} ({} points)",
            op.id, self.connection_id, joined.id, point_count
        );

        let recipients = room.member_ids();
        self.broadcaster
            .multicast(&recipients, &ServerMessage::Stroke { op });
        self.broadcaster.multicast(
            &recipients,
            &ServerMessage::History {
                history: room.log.snapshot(),
            },
        );
    }

    /// Undo the room's last operation, if there is one
    pub async fn undo(&mut self) {
        let Some(joined) = &self.joined else {
            return;
        };

        let mut room = joined.room.lock().await;
        let Some(op) = room.log.undo() else {
            debug!("Nothing to undo in {}", joined.id);
            return;
        };
        debug!("Undo in {} by {} -> op {}", joined.id, self.connection_id, op.id);

        let recipients = room.member_ids();
        self.broadcaster
            .multicast(&recipients, &ServerMessage::Undo { op_id: op.id });
        self.broadcaster.multicast(
            &recipients,
            &ServerMessage::History {
                history: room.log.snapshot(),
            },
        );
    }

    /// Redo the room's last undone operation, if there is one
    pub async fn redo(&mut self) {
        let Some(joined) = &self.joined else {
            return;
        };

        let mut room = joined.room.lock().await;
        let Some(op) = room.log.redo() else {
            debug!("Nothing to redo in {}", joined.id);
            return;
        };
        debug!("Redo in {} by {} -> op {}", joined.id, self.connection_id, op.id);

        let recipients = room.member_ids();
        self.broadcaster
            .multicast(&recipients, &ServerMessage::Redo { op });
        self.broadcaster.multicast(
            &recipients,
            &ServerMessage::History {
                history: room.log.snapshot(),
            },
        );
    }

    /// Wipe the room's canvas and redo stack
    pub async fn clear(&mut self) {
        let Some(joined) = &self.joined else {
            return;
        };

        let mut room = joined.room.lock().await;
        room.log.clear();
        info!("Clear in {} by {}", joined.id, self.connection_id);

        let recipients = room.member_ids();
        self.broadcaster.multicast(&recipients, &ServerMessage::Clear);
        self.broadcaster.multicast(
            &recipients,
            &ServerMessage::History {
                history: room.log.snapshot(),
            },
        );
    }

    /// Relay a pointer position to everyone else in the room
    pub async fn cursor(&mut self, cursor: Point) {
        let Some(joined) = &self.joined else {
            return;
        };

        let room = joined.room.lock().await;
        self.broadcaster.multicast_except(
            &room.member_ids(),
            Some(&self.connection_id),
            &ServerMessage::Cursor {
                user_id: self.connection_id.clone(),
                cursor,
            },
        );
    }

    /// Echo a latency probe back to the sender
    pub fn ping(&self, t: serde_json::Value) {
        self.reply(&ServerMessage::Pong { t });
    }

    /// Leave the joined room and tell the remaining members
    pub async fn disconnect(&mut self) {
        let Some(joined) = self.joined.take() else {
            return;
        };

        let mut room = joined.room.lock().await;
        if room.remove_member(&self.connection_id).is_none() {
            warn!(
                "Connection {} was not a member of {} on disconnect",
                self.connection_id, joined.id
            );
            return;
        }

        self.broadcaster.multicast(
            &room.member_ids(),
            &ServerMessage::UserLeft {
                user_id: self.connection_id.clone(),
            },
        );
        info!(
            "User left: {} <- room {}, {} members remain",
            self.connection_id,
            joined.id,
            room.member_count()
        );
    }

    fn reply(&self, message: &ServerMessage) {
        if !self.broadcaster.unicast(&self.connection_id, message) {
            warn!("Failed to reply to {}", self.connection_id);
        }
    }
}
