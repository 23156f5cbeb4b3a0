use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SeaORM entity for the `chat_rooms` table.
///
/// Membership is a flat JSON array of user ids — no roles. The last-message
/// fields are denormalized so room listings avoid a join against `messages`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub creator_id: Uuid,
    pub member_ids: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decode the member id array, skipping anything that is not a UUID.
    pub fn member_list(&self) -> Vec<Uuid> {
        self.member_ids
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|s| Uuid::parse_str(s).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.member_list().contains(&user_id)
    }
}

/// Encode a member list back into the JSON column representation.
pub fn members_to_json(members: &[Uuid]) -> Json {
    Json::Array(
        members
            .iter()
            .map(|id| Json::String(id.to_string()))
            .collect(),
    )
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: Option<String>,
    pub member_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMembers {
    pub member_ids: Option<Vec<Uuid>>,
}
