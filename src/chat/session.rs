use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::jwt;
use crate::chat::protocol::{ClientMessage, ServerMessage};
use crate::chat::server::ChatServer;
use crate::config::AppConfig;
use crate::db::chat_rooms as room_db;
use crate::db::messages as message_db;
use crate::models::messages::CreateMessage;

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/chat/ws/{room_id}?token=<jwt>
///
/// Upgrades the HTTP connection to a WebSocket. Authenticates via query
/// param token (browsers can't send Authorization headers during the
/// WebSocket handshake), then validates that the room exists and the caller
/// is a member before joining.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    query: web::Query<WsQuery>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    chat_server: web::Data<Arc<ChatServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    let room_id = path.into_inner();

    let claims = jwt::validate_token(&query.token, &config.jwt_secret)?;
    let user_id = claims.sub;

    let room = room_db::get_room_by_id(db.get_ref(), room_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?
        .ok_or_else(|| actix_web::error::ErrorNotFound(format!("Chat room {room_id} not found")))?;

    if !room.is_member(user_id) {
        return Err(actix_web::error::ErrorForbidden(
            "You are not a member of this chat room",
        ));
    }

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let rx = chat_server.join(room_id, user_id).await;

    let db_clone = db.get_ref().clone();
    let chat_server_clone = chat_server.get_ref().clone();

    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        room_id,
        user_id,
        db_clone,
        chat_server_clone,
    ));

    Ok(response)
}

/// Drives the WebSocket session: reads incoming messages from the client,
/// sends outgoing messages from the chat server, and cleans up on disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    room_id: Uuid,
    user_id: Uuid,
    db: DatabaseConnection,
    chat_server: Arc<ChatServer>,
) {
    loop {
        tokio::select! {
            // Incoming message from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        handle_client_message(
                            &text,
                            &mut session,
                            room_id,
                            user_id,
                            &db,
                            &chat_server,
                        )
                        .await;
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Outgoing message from the chat server to this client.
            Some(server_msg) = rx.recv() => {
                let json = match serde_json::to_string(&server_msg) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    chat_server.leave(room_id, user_id).await;
    let _ = session.close(None).await;
}

/// Parse and handle an incoming client message.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    room_id: Uuid,
    user_id: Uuid,
    db: &DatabaseConnection,
    chat_server: &ChatServer,
) {
    let client_msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let err = ServerMessage::Error {
                message: format!("Invalid message format: {e}"),
            };
            let _ = session
                .text(serde_json::to_string(&err).unwrap_or_default())
                .await;
            return;
        }
    };

    match client_msg {
        ClientMessage::SendMessage { content } => {
            if content.trim().is_empty() {
                let err = ServerMessage::Error {
                    message: "Message content cannot be empty".to_string(),
                };
                let _ = session
                    .text(serde_json::to_string(&err).unwrap_or_default())
                    .await;
                return;
            }

            let input = CreateMessage {
                room_id,
                sender_id: user_id,
                content: content.clone(),
            };

            match message_db::insert_message(db, input).await {
                Ok(saved) => {
                    // Persistence and live delivery are independent paths;
                    // the denormalized room fields are refreshed best-effort.
                    let _ = room_db::update_last_message(
                        db,
                        room_id,
                        &saved.content,
                        saved.created_at,
                    )
                    .await;

                    let msg = ServerMessage::NewMessage {
                        id: saved.id,
                        sender_id: saved.sender_id,
                        content: saved.content,
                        created_at: saved.created_at.to_rfc3339(),
                    };

                    chat_server.broadcast(room_id, msg, None).await;
                }
                Err(e) => {
                    let err = ServerMessage::Error {
                        message: format!("Failed to save message: {e}"),
                    };
                    let _ = session
                        .text(serde_json::to_string(&err).unwrap_or_default())
                        .await;
                }
            }
        }

        ClientMessage::Typing => {
            let msg = ServerMessage::UserTyping { user_id };
            // Only send to others — the sender already knows they're typing.
            chat_server.broadcast(room_id, msg, Some(user_id)).await;
        }

        ClientMessage::StopTyping => {
            let msg = ServerMessage::UserStopTyping { user_id };
            chat_server.broadcast(room_id, msg, Some(user_id)).await;
        }
    }
}
