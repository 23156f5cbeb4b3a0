use sea_orm::*;
use uuid::Uuid;

use crate::models::messages::{self, CreateMessage};

pub async fn insert_message(
    db: &DatabaseConnection,
    input: CreateMessage,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        room_id: Set(input.room_id),
        sender_id: Set(input.sender_id),
        content: Set(input.content),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Message history for a room, newest first, with page/limit pagination.
pub async fn get_messages_by_room(
    db: &DatabaseConnection,
    room_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::RoomId.eq(room_id))
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}
