use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::contracts;
use crate::models::transactions::{self, Mode};

/// Insert a new contract in its initial state. The creating lawyer is
/// recorded as both creator and lawyer party.
pub async fn insert_contract(
    db: &DatabaseConnection,
    lawyer_id: Uuid,
    client_id: Uuid,
    title: String,
    description: String,
    price: i64,
) -> Result<contracts::Model, ApiError> {
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        creator_id: Set(lawyer_id),
        title: Set(title),
        description: Set(description),
        price: Set(price),
        is_paid: Set(false),
        paid_on: Set(None),
        is_accepted: Set(false),
        accepted_on: Set(None),
        is_ended: Set(false),
        ended_on: Set(None),
        ended_reason: Set(None),
        lawyer_id: Set(lawyer_id),
        client_id: Set(client_id),
        review_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_contract.insert(db).await?)
}

pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

pub async fn get_all_contracts(db: &DatabaseConnection) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Contracts where the given user is a party, on either side.
pub async fn get_contracts_by_party(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(
            Condition::any()
                .add(contracts::Column::ClientId.eq(user_id))
                .add(contracts::Column::LawyerId.eq(user_id)),
        )
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Mark a contract accepted. The caller has already run `ensure_can_accept`.
pub async fn accept_contract(
    db: &DatabaseConnection,
    contract: contracts::Model,
) -> Result<contracts::Model, DbErr> {
    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    active.is_accepted = Set(true);
    active.accepted_on = Set(Some(now));
    active.updated_at = Set(Some(now));
    active.update(db).await
}

/// Record a confirmed payment: flip `is_paid`, stamp `paid_on`, and append a
/// credit row to the ledger — one transaction, so a crash can't leave the
/// flag without its ledger entry.
///
/// Idempotent: a repeated confirmation for an already-paid contract is a
/// no-op and returns `false` (no flag rewrite, no duplicate ledger row).
pub async fn record_payment(db: &DatabaseConnection, contract_id: Uuid) -> Result<bool, ApiError> {
    let txn = db.begin().await?;

    // Row lock so concurrent confirmations serialize on the contract: the
    // second one observes `is_paid` and backs off instead of double-crediting.
    let contract = contracts::Entity::find_by_id(contract_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id}")))?;

    if contract.is_paid {
        txn.commit().await?;
        return Ok(false);
    }

    let now = chrono::Utc::now();
    let amount = contract.price;
    let title = contract.title.clone();

    let mut active: contracts::ActiveModel = contract.into();
    active.is_paid = Set(true);
    active.paid_on = Set(Some(now));
    active.updated_at = Set(Some(now));
    active.update(&txn).await?;

    let credit = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        description: Set(format!("Payment received for contract: {title}")),
        amount: Set(amount),
        pending: Set(false),
        mode: Set(Mode::Credit),
        contract_id: Set(contract_id),
        created_at: Set(now),
    };
    credit.insert(&txn).await?;

    txn.commit().await?;
    Ok(true)
}

/// End a contract. The caller has already run `ensure_can_end`.
pub async fn end_contract(
    db: &DatabaseConnection,
    contract: contracts::Model,
    reason: String,
) -> Result<contracts::Model, DbErr> {
    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    active.is_ended = Set(true);
    active.ended_on = Set(Some(now));
    active.ended_reason = Set(Some(reason));
    active.updated_at = Set(Some(now));
    active.update(db).await
}

pub async fn delete_contract(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    contracts::Entity::delete_by_id(id).exec(db).await
}
