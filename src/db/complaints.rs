use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::complaints::{self, STATUS_IN_PROCESS};
use crate::models::contracts;

/// File a complaint against a paid, ended contract. At most one complaint
/// per (contract, creator) pair.
pub async fn create_complaint(
    db: &DatabaseConnection,
    creator_id: Uuid,
    subject: String,
    description: String,
    contract_id: Uuid,
    client_id: Uuid,
    lawyer_id: Uuid,
) -> Result<complaints::Model, ApiError> {
    let contract = contracts::Entity::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id}")))?;

    contract.ensure_complainable(client_id, lawyer_id)?;

    let duplicate = complaints::Entity::find()
        .filter(complaints::Column::ContractId.eq(contract_id))
        .filter(complaints::Column::CreatorId.eq(creator_id))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(ApiError::Conflict(
            "You have already filed a complaint for this contract".to_string(),
        ));
    }

    let complaint = complaints::ActiveModel {
        id: Set(Uuid::new_v4()),
        creator_id: Set(creator_id),
        subject: Set(subject),
        description: Set(description),
        status: Set(STATUS_IN_PROCESS.to_string()),
        details: Set(None),
        is_resolved: Set(false),
        resolved_on: Set(None),
        contract_id: Set(contract_id),
        client_id: Set(client_id),
        lawyer_id: Set(lawyer_id),
        admin_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(complaint.insert(db).await?)
}

/// Admin resolution: update status/details and, when `completed`, mark the
/// complaint resolved. Single-step open → resolved; no SLA timers.
pub async fn resolve_complaint(
    db: &DatabaseConnection,
    id: Uuid,
    admin_id: Uuid,
    status: String,
    details: Option<String>,
    completed: bool,
) -> Result<complaints::Model, ApiError> {
    let complaint = complaints::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Complaint {id}")))?;

    let now = chrono::Utc::now();
    let mut active: complaints::ActiveModel = complaint.into();
    active.status = Set(status);
    active.admin_id = Set(Some(admin_id));
    if let Some(details) = details {
        active.details = Set(Some(details));
    }
    if completed {
        active.is_resolved = Set(true);
        active.resolved_on = Set(Some(now));
    }
    active.updated_at = Set(Some(now));

    Ok(active.update(db).await?)
}

pub async fn get_all_complaints(db: &DatabaseConnection) -> Result<Vec<complaints::Model>, DbErr> {
    complaints::Entity::find()
        .order_by_desc(complaints::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_complaint_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<complaints::Model>, DbErr> {
    complaints::Entity::find_by_id(id).one(db).await
}

/// Complaints filed by a user (as creator).
pub async fn get_complaints_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<complaints::Model>, DbErr> {
    complaints::Entity::find()
        .filter(complaints::Column::CreatorId.eq(user_id))
        .all(db)
        .await
}
