use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::chat::protocol::ServerMessage;

/// A handle to send messages to a connected WebSocket client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub user_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Registry of live WebSocket connections, organized by chat room id.
///
/// Tracks only who is connected right now — membership itself lives on the
/// `chat_rooms` row. Live delivery and message persistence are independent,
/// uncoordinated paths.
pub struct ChatServer {
    /// room_id -> list of connected client handles
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new WebSocket connection for a room.
    /// Returns a receiver that the WebSocket session should listen on.
    pub async fn join(&self, room_id: Uuid, user_id: Uuid) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = ClientHandle {
            user_id,
            sender: tx,
        };

        let presence_msg = ServerMessage::Presence {
            user_id,
            online: true,
        };

        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(room_id).or_insert_with(Vec::new);

        // Send presence to existing members before adding the new one.
        for client in room.iter() {
            if client.user_id != user_id {
                let _ = client.sender.send(presence_msg.clone());
            }
        }

        room.push(handle);

        rx
    }

    /// Remove a WebSocket connection for a room.
    pub async fn leave(&self, room_id: Uuid, user_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(&room_id) {
            // A user can hold multiple connections, so only remove one.
            if let Some(pos) = room.iter().position(|c| c.user_id == user_id) {
                room.remove(pos);
            }

            let still_connected = room.iter().any(|c| c.user_id == user_id);

            if !still_connected {
                let presence_msg = ServerMessage::Presence {
                    user_id,
                    online: false,
                };
                for client in room.iter() {
                    let _ = client.sender.send(presence_msg.clone());
                }
            }

            if room.is_empty() {
                rooms.remove(&room_id);
            }
        }
    }

    /// Broadcast a message to all connected members of a room, optionally
    /// excluding the sender.
    pub async fn broadcast(&self, room_id: Uuid, message: ServerMessage, exclude_user: Option<Uuid>) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&room_id) {
            for client in room {
                if Some(client.user_id) == exclude_user {
                    continue;
                }
                // A failed send means the receiver disconnected; leave()
                // cleans the handle up.
                let _ = client.sender.send(message.clone());
            }
        }
    }
}
