use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::transactions::{self, Mode};

/// Append a debit row to the ledger (admin action, e.g. a refund or fee).
pub async fn insert_debit(
    db: &DatabaseConnection,
    description: String,
    amount: i64,
    contract_id: Uuid,
) -> Result<transactions::Model, ApiError> {
    let contract = crate::db::contracts::get_contract_by_id(db, contract_id).await?;
    if contract.is_none() {
        return Err(ApiError::not_found(format!("Contract {contract_id}")));
    }

    let debit = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(description),
        amount: Set(amount),
        pending: Set(false),
        mode: Set(Mode::Debit),
        contract_id: Set(contract_id),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(debit.insert(db).await?)
}

/// Every ledger row on contracts where the given user is a party.
pub async fn get_transactions_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<transactions::Model>, DbErr> {
    let contracts = crate::db::contracts::get_contracts_by_party(db, user_id).await?;
    let contract_ids: Vec<Uuid> = contracts.iter().map(|c| c.id).collect();
    if contract_ids.is_empty() {
        return Ok(Vec::new());
    }

    transactions::Entity::find()
        .filter(transactions::Column::ContractId.is_in(contract_ids))
        .order_by_desc(transactions::Column::CreatedAt)
        .all(db)
        .await
}

/// Restrict a set of ledger rows to one mode.
pub fn filter_by_mode(rows: Vec<transactions::Model>, mode: Mode) -> Vec<transactions::Model> {
    rows.into_iter().filter(|t| t.mode == mode).collect()
}
