use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Client -> Server messages ──

/// Messages the client sends to the server over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Send a chat message to the room.
    SendMessage { content: String },
    /// Notify the room that the user is typing.
    Typing,
    /// Notify the room that the user stopped typing.
    StopTyping,
}

// ── Server -> Client messages ──

/// Messages the server sends to the client over WebSocket. Delivery is
/// fire-and-forget: no acknowledgement, ordering, or backpressure handling.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new message was persisted (echoed to the sender too, so they get
    /// the server-assigned id and timestamp).
    NewMessage {
        id: Uuid,
        sender_id: Uuid,
        content: String,
        created_at: String,
    },
    /// Another member is typing.
    UserTyping { user_id: Uuid },
    /// Another member stopped typing.
    UserStopTyping { user_id: Uuid },
    /// Presence update: a member came online or went offline in this room.
    Presence { user_id: Uuid, online: bool },
    /// An error occurred.
    Error { message: String },
}
