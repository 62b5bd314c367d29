//! Delivery of server events to one connection or to a room's members
//!
//! Every send is independent: a recipient that cannot be reached is logged
//! and skipped, the rest still get the message.

use crate::core::message_types::ServerMessage;

pub trait Broadcaster: Send + Sync {
    /// Deliver an already serialized frame to one connection
    fn send_text(&self, connection_id: &str, text: &str) -> bool;

    /// Send to a single connection
    fn unicast(&self, connection_id: &str, message: &ServerMessage) -> bool {
        match message.to_text() {
            Ok(text) => self.send_text(connection_id, &text),
            Err(e) => {
                log::error!("Failed to serialize message for {}: {}", connection_id, e);
                false
            }
        }
    }

    /// Send to every listed member, returning how many were reached
    fn multicast(&self, recipients: &[String], message: &ServerMessage) -> usize {
        self.multicast_except(recipients, None, message)
    }

    /// Send to every listed member except `exclude`
    fn multicast_except(
        &self,
        recipients: &[String],
        exclude: Option<&str>,
        message: &ServerMessage,
    ) -> usize {
        let text = match message.to_text() {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to serialize broadcast message: {}", e);
                return 0;
            }
        };

        recipients
            .iter()
            .filter(|id| Some(id.as_str()) != exclude)
            .filter(|id| self.send_text(id, &text))
            .count()
    }
}
