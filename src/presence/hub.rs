//! In-Process Presence Hub
//!
//! Room registry backing the `PresenceChannel` seam without a network:
//! per-room participant map plus a broadcast stream of presence events.
//! The hosted presence service slots in behind the same trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{ConnectionId, Participant, Presence, PresenceChannel};

const EVENT_BUFFER: usize = 64;

/// A presence update as seen by other participants
#[derive(Debug, Clone)]
pub struct PresenceEvent {
    pub connection_id: ConnectionId,
    pub presence: Presence,
}

struct Room {
    participants: Mutex<HashMap<ConnectionId, Presence>>,
    events: broadcast::Sender<PresenceEvent>,
}

impl Room {
    fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            participants: Mutex::new(HashMap::new()),
            events,
        }
    }
}

/// Process-wide registry of presence rooms
pub struct PresenceHub {
    rooms: Mutex<HashMap<String, Arc<Room>>>,
    next_connection: AtomicU64,
}

impl PresenceHub {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            next_connection: AtomicU64::new(1),
        }
    }

    /// Join a room, creating it on first use. The connection announces
    /// itself with an empty presence and leaves again on drop.
    pub fn join(&self, room_id: &str) -> RoomConnection {
        let room = {
            let mut rooms = self.rooms.lock().expect("hub lock");
            rooms
                .entry(room_id.to_string())
                .or_insert_with(|| Arc::new(Room::new()))
                .clone()
        };
        let connection_id = self.next_connection.fetch_add(1, Ordering::Relaxed);
        room.participants
            .lock()
            .expect("room lock")
            .insert(connection_id, Presence::default());
        RoomConnection {
            room,
            connection_id,
        }
    }
}

impl Default for PresenceHub {
    fn default() -> Self {
        Self::new()
    }
}

/// One participant's handle on a room
pub struct RoomConnection {
    room: Arc<Room>,
    connection_id: ConnectionId,
}

impl RoomConnection {
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Stream of presence updates from every participant in the room
    pub fn subscribe(&self) -> broadcast::Receiver<PresenceEvent> {
        self.room.events.subscribe()
    }
}

impl Drop for RoomConnection {
    fn drop(&mut self) {
        self.room
            .participants
            .lock()
            .expect("room lock")
            .remove(&self.connection_id);
    }
}

#[async_trait]
impl PresenceChannel for RoomConnection {
    async fn publish(&self, presence: Presence) {
        self.room
            .participants
            .lock()
            .expect("room lock")
            .insert(self.connection_id, presence);
        // Fire-and-forget; a room with no listeners is fine.
        let _ = self.room.events.send(PresenceEvent {
            connection_id: self.connection_id,
            presence,
        });
    }

    async fn others(&self) -> Vec<Participant> {
        let participants = self.room.participants.lock().expect("room lock");
        let mut others: Vec<Participant> = participants
            .iter()
            .filter(|(id, _)| **id != self.connection_id)
            .map(|(id, presence)| Participant {
                connection_id: *id,
                presence: *presence,
            })
            .collect();
        others.sort_by_key(|p| p.connection_id);
        others
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_others_excludes_self() {
        let hub = PresenceHub::new();
        let a = hub.join("project-room-1");
        let b = hub.join("project-room-1");

        a.publish(Presence::at(10, 20)).await;
        b.publish(Presence::at(30, 40)).await;

        let seen_by_a = a.others().await;
        assert_eq!(seen_by_a.len(), 1);
        assert_eq!(seen_by_a[0].connection_id, b.connection_id());
        assert_eq!(seen_by_a[0].presence, Presence::at(30, 40));
    }

    #[tokio::test]
    async fn test_last_publish_wins() {
        let hub = PresenceHub::new();
        let a = hub.join("project-room-1");
        let b = hub.join("project-room-1");

        a.publish(Presence::at(1, 1)).await;
        a.publish(Presence::at(2, 2)).await;

        let seen_by_b = b.others().await;
        assert_eq!(seen_by_b[0].presence, Presence::at(2, 2));
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let hub = PresenceHub::new();
        let a = hub.join("project-room-1");
        let _b = hub.join("project-room-2");

        assert!(a.others().await.is_empty());
    }

    #[tokio::test]
    async fn test_leaving_removes_participant() {
        let hub = PresenceHub::new();
        let a = hub.join("project-room-1");
        let b = hub.join("project-room-1");
        assert_eq!(a.others().await.len(), 1);

        drop(b);
        assert!(a.others().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let hub = PresenceHub::new();
        let a = hub.join("project-room-1");
        let b = hub.join("project-room-1");
        let mut events = b.subscribe();

        a.publish(Presence::at(5, 6)).await;

        let event = events.recv().await.expect("event delivered");
        assert_eq!(event.connection_id, a.connection_id());
        assert_eq!(event.presence, Presence::at(5, 6));
    }
}
