use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `reviews` table.
///
/// Rating bounds (1–5) are deliberately unenforced at the data layer; the
/// aggregate's 5.0 cap is the only clamp applied.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub review_text: String,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LawyerId",
        to = "super::users::Column::Id"
    )]
    Lawyer,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/review. The client id comes from the JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub contract_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}
