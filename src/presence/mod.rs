//! Presence
//!
//! Live cursor sharing for retro boards. Each board maps to a room named
//! after its project; participants publish `{ cursor }` payloads and render
//! everyone else's last known position as an overlay.

mod hub;
mod throttle;

pub use hub::{PresenceEvent, PresenceHub, RoomConnection};
pub use throttle::{CursorPublisher, PublishThrottle};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifies one participant connection within a room
pub type ConnectionId = u64;

/// Screen-space pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
}

/// Presence payload published to a room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub cursor: Option<Cursor>,
}

impl Presence {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            cursor: Some(Cursor { x, y }),
        }
    }
}

/// A remote participant's last published presence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub presence: Presence,
}

/// Room id for a project's retro board
pub fn room_for_project(project_id: &str) -> String {
    format!("project-room-{project_id}")
}

/// Publish/observe seam for one connection to a presence room.
///
/// Publishing is fire-and-forget: no acknowledgement, no retry. Board
/// state never depends on anything behind this trait.
#[async_trait]
pub trait PresenceChannel: Send + Sync {
    /// Replace this connection's presence in the room
    async fn publish(&self, presence: Presence);

    /// Every other participant's last published presence
    async fn others(&self) -> Vec<Participant>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_naming() {
        assert_eq!(room_for_project("42"), "project-room-42");
    }
}
