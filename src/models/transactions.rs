use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[sea_orm(string_value = "credit")]
    Credit,
    #[sea_orm(string_value = "debit")]
    Debit,
}

/// SeaORM entity for the `transactions` table — an append-only ledger.
/// Credit rows are written by the payment webhook, debit rows by admins.
/// No reconciliation logic exists over this table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub pending: bool,
    pub mode: Mode,
    pub contract_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for the admin-only debit endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDebit {
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub contract_id: Option<Uuid>,
}
