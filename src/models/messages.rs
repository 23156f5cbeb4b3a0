use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `messages` table. Ordering carries no guarantee
/// beyond the insertion timestamp.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub room_id: Uuid,
    pub sender_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chat_rooms::Entity",
        from = "Column::RoomId",
        to = "super::chat_rooms::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id"
    )]
    Sender,
}

impl Related<super::chat_rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// DTO for persisting a new message (used by the WebSocket session).
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
}

/// Query parameters for paginated message history.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
