use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin role stored as a lowercase string. Exactly one super-admin exists,
/// bootstrapped at startup under the nil UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
pub enum AdminRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "super-admin")]
    SuperAdmin,
}

/// SeaORM entity for the `admins` table — a separate identity space from
/// `users`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub role: AdminRole,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdmin {
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAdmin {
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
}
