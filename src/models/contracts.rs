use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::auth::access::{self, Identity};
use crate::error::ApiError;

/// SeaORM entity for the `contracts` table.
///
/// Lifecycle: Created → (Accepted?) → Paid → Ended. `is_accepted` and
/// `is_paid` are independent flags — acceptance is an acknowledgment between
/// the parties and does not gate payment. `is_ended` is terminal and only
/// reachable from a paid contract.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The lawyer who drew up the contract.
    pub creator_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Price in the smallest currency unit.
    pub price: i64,

    pub is_paid: bool,
    pub paid_on: Option<DateTimeUtc>,

    pub is_accepted: bool,
    pub accepted_on: Option<DateTimeUtc>,

    pub is_ended: bool,
    pub ended_on: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ended_reason: Option<String>,

    pub lawyer_id: Uuid,
    pub client_id: Uuid,
    /// Set exactly once; a contract is reviewed at most one time.
    pub review_id: Option<Uuid>,

    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LawyerId",
        to = "super::users::Column::Id"
    )]
    Lawyer,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::reviews::Entity",
        from = "Column::ReviewId",
        to = "super::reviews::Column::Id"
    )]
    Review,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.lawyer_id == user_id
    }

    /// Acceptance guard: only a party other than the creator may accept, and
    /// only once.
    pub fn ensure_can_accept(&self, approver_id: Uuid) -> Result<(), ApiError> {
        if approver_id == self.creator_id {
            return Err(ApiError::Unauthorized(
                "The creator cannot accept their own contract".to_string(),
            ));
        }
        if !self.is_party(approver_id) {
            return Err(ApiError::Unauthorized(
                "You are not a party to this contract".to_string(),
            ));
        }
        if self.is_accepted {
            return Err(ApiError::Conflict(
                "Contract has already been accepted".to_string(),
            ));
        }
        Ok(())
    }

    /// Ending guard: only the contract's client, only once, and never while
    /// unpaid — `is_ended` implies `is_paid`.
    pub fn ensure_can_end(&self, caller_id: Uuid) -> Result<(), ApiError> {
        if caller_id != self.client_id {
            return Err(ApiError::Unauthorized(
                "Only the contract's client can end it".to_string(),
            ));
        }
        if !self.is_paid {
            return Err(ApiError::BadRequest(
                "Cannot end a contract that has not been paid".to_string(),
            ));
        }
        if self.is_ended {
            return Err(ApiError::Conflict(
                "Contract has already been ended".to_string(),
            ));
        }
        Ok(())
    }

    /// Deletion guard: a paid contract is never deleted so the ledger trail
    /// stays intact; otherwise a party or an admin may delete.
    pub fn ensure_can_delete(&self, ident: &Identity) -> Result<(), ApiError> {
        if self.is_paid {
            return Err(ApiError::Conflict(
                "A paid contract cannot be deleted".to_string(),
            ));
        }
        if !self.is_party(ident.id) && !access::is_any_admin(ident) {
            return Err(ApiError::Unauthorized(
                "You are not a party to this contract".to_string(),
            ));
        }
        Ok(())
    }

    /// Checkout guard: no second payment for an already-paid contract, and
    /// the price must be positive before a session is created.
    pub fn ensure_payable(&self) -> Result<(), ApiError> {
        if self.is_paid {
            return Err(ApiError::Conflict(
                "Contract has already been paid".to_string(),
            ));
        }
        if self.price <= 0 {
            return Err(ApiError::BadRequest(
                "Contract price must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Review guard: one review per contract, created by the contract's
    /// client against the contract's lawyer, only after the contract ended.
    pub fn ensure_reviewable(&self, client_id: Uuid, lawyer_id: Uuid) -> Result<(), ApiError> {
        if self.review_id.is_some() {
            return Err(ApiError::Conflict(
                "A review already exists for this contract".to_string(),
            ));
        }
        if self.client_id != client_id {
            return Err(ApiError::Unauthorized(
                "Client is not associated with this contract".to_string(),
            ));
        }
        if self.lawyer_id != lawyer_id {
            return Err(ApiError::BadRequest(
                "Lawyer is not associated with this contract".to_string(),
            ));
        }
        if !self.is_ended {
            return Err(ApiError::BadRequest(
                "The contract has not ended yet".to_string(),
            ));
        }
        Ok(())
    }

    /// Complaint guard: the named pair must match the contract's parties and
    /// the contract must have been paid and ended.
    pub fn ensure_complainable(&self, client_id: Uuid, lawyer_id: Uuid) -> Result<(), ApiError> {
        if self.client_id != client_id || self.lawyer_id != lawyer_id {
            return Err(ApiError::Unauthorized(
                "Named parties do not match this contract".to_string(),
            ));
        }
        if !self.is_paid || !self.is_ended {
            return Err(ApiError::BadRequest(
                "Complaints require a paid and ended contract".to_string(),
            ));
        }
        Ok(())
    }
}

// ── DTOs ──

/// Request body for POST /api/contract. The lawyer id comes from the JWT.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<Uuid>,
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndContract {
    pub ended_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub contract_id: Option<Uuid>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}
