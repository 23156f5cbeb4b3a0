use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::chat_rooms::{self, members_to_json};
use crate::models::users;

/// Create a chat room; the creator is always a member. Room names are
/// globally unique — a collision is a 409.
pub async fn insert_room(
    db: &DatabaseConnection,
    name: String,
    creator_id: Uuid,
    member_ids: Vec<Uuid>,
) -> Result<chat_rooms::Model, ApiError> {
    if get_room_by_name(db, &name).await?.is_some() {
        return Err(ApiError::Conflict(
            "A chat room with this name already exists".to_string(),
        ));
    }

    let mut members = vec![creator_id];
    for id in member_ids {
        if !members.contains(&id) {
            members.push(id);
        }
    }

    let room = chat_rooms::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        creator_id: Set(creator_id),
        member_ids: Set(members_to_json(&members)),
        last_message: Set(None),
        last_message_at: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(room.insert(db).await?)
}

pub async fn get_room_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<chat_rooms::Model>, DbErr> {
    chat_rooms::Entity::find_by_id(id).one(db).await
}

pub async fn get_room_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<chat_rooms::Model>, DbErr> {
    chat_rooms::Entity::find()
        .filter(chat_rooms::Column::Name.eq(name))
        .one(db)
        .await
}

pub async fn get_all_rooms(db: &DatabaseConnection) -> Result<Vec<chat_rooms::Model>, DbErr> {
    chat_rooms::Entity::find()
        .order_by_desc(chat_rooms::Column::CreatedAt)
        .all(db)
        .await
}

/// Rooms the given user belongs to. Membership lives in a JSON array, so the
/// filter happens after the fetch.
pub async fn get_rooms_of_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<chat_rooms::Model>, DbErr> {
    let rooms = get_all_rooms(db).await?;
    Ok(rooms.into_iter().filter(|r| r.is_member(user_id)).collect())
}

/// Add members to a room; unknown users are a 404, duplicates are ignored.
pub async fn add_members(
    db: &DatabaseConnection,
    room: chat_rooms::Model,
    new_member_ids: Vec<Uuid>,
) -> Result<chat_rooms::Model, ApiError> {
    let mut members = room.member_list();
    for id in new_member_ids {
        let exists = users::Entity::find_by_id(id).one(db).await?.is_some();
        if !exists {
            return Err(ApiError::not_found(format!("User {id}")));
        }
        if !members.contains(&id) {
            members.push(id);
        }
    }

    let mut active: chat_rooms::ActiveModel = room.into();
    active.member_ids = Set(members_to_json(&members));

    Ok(active.update(db).await?)
}

/// Refresh the denormalized last-message fields after a message persists.
pub async fn update_last_message(
    db: &DatabaseConnection,
    room_id: Uuid,
    content: &str,
    at: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let Some(room) = chat_rooms::Entity::find_by_id(room_id).one(db).await? else {
        return Ok(());
    };

    let mut active: chat_rooms::ActiveModel = room.into();
    active.last_message = Set(Some(content.to_string()));
    active.last_message_at = Set(Some(at));
    active.update(db).await?;
    Ok(())
}
