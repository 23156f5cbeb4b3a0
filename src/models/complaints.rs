use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Initial status for a freshly filed complaint.
pub const STATUS_IN_PROCESS: &str = "In Process";

/// SeaORM entity for the `complaints` table.
///
/// One complaint per (contract, creator) pair; resolution is a single-step
/// open → resolved transition handled by an admin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub creator_id: Uuid,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Free-text workflow status, starts as "In Process".
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,

    pub is_resolved: bool,
    pub resolved_on: Option<DateTimeUtc>,

    pub contract_id: Uuid,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    /// The admin who handled the complaint, once one has.
    pub admin_id: Option<Uuid>,

    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
    #[sea_orm(
        belongs_to = "super::admins::Entity",
        from = "Column::AdminId",
        to = "super::admins::Column::Id"
    )]
    Admin,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/complaint. The creator is the authenticated
/// client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComplaint {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub contract_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
}

/// Request body for the admin resolution endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveComplaint {
    pub status: Option<String>,
    pub details: Option<String>,
    /// When set, marks the complaint resolved and stamps `resolved_on`.
    pub completed: Option<bool>,
}
