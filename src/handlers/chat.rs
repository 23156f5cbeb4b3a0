use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::chat_rooms as room_db;
use crate::db::messages as message_db;
use crate::error::ApiError;
use crate::models::chat_rooms::{AddMembers, CreateRoom};
use crate::models::messages::MessageQuery;
use crate::models::required;

/// POST /api/chat/room — create a room; the creator is always a member.
pub async fn create_room(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRoom>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let name = required(body.name, "name")?;
    let member_ids = required(body.member_ids, "member_ids")?;

    let room = room_db::insert_room(db.get_ref(), name, auth.0.id, member_ids).await?;
    Ok(HttpResponse::Created().json(room))
}

/// GET /api/chat/room — every room; admin only.
pub async fn get_rooms(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let rooms = room_db::get_all_rooms(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// GET /api/chat/room/{id} — single room; any authenticated caller.
pub async fn get_room(
    _auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let room = room_db::get_room_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat room {id}")))?;
    Ok(HttpResponse::Ok().json(room))
}

/// GET /api/chat/room/name/{name} — lookup by unique name.
pub async fn get_room_by_name(
    _auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    let room = room_db::get_room_by_name(db.get_ref(), &name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat room '{name}'")))?;
    Ok(HttpResponse::Ok().json(room))
}

/// GET /api/chat/room/user/{id} — rooms a user belongs to; self or admin.
pub async fn get_rooms_of_user(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    access::require_self_or_admin(&auth.0, user_id)?;

    let rooms = room_db::get_rooms_of_user(db.get_ref(), user_id).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// GET /api/chat/my-rooms — the caller's rooms.
pub async fn my_rooms(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let rooms = room_db::get_rooms_of_user(db.get_ref(), auth.0.id).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// PUT /api/chat/room/{id}/members — the room's creator or an admin adds
/// members; unknown users are a 404.
pub async fn add_members(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<AddMembers>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let room = room_db::get_room_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat room {id}")))?;

    if room.creator_id != auth.0.id && !access::is_any_admin(&auth.0) {
        return Err(ApiError::Unauthorized(
            "Only the room's creator or an admin can add members".to_string(),
        ));
    }

    let member_ids = required(body.into_inner().member_ids, "member_ids")?;
    let updated = room_db::add_members(db.get_ref(), room, member_ids).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/chat/room/{id}/messages — paginated history, newest first;
/// members only.
pub async fn get_room_messages(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<MessageQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let room = room_db::get_room_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Chat room {id}")))?;

    if !room.is_member(auth.0.id) && !access::is_any_admin(&auth.0) {
        return Err(ApiError::Forbidden(
            "You are not a member of this chat room".to_string(),
        ));
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let messages = message_db::get_messages_by_room(db.get_ref(), id, page, limit).await?;
    Ok(HttpResponse::Ok().json(messages))
}
