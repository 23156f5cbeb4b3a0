use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access::{self, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::transactions as transaction_db;
use crate::error::ApiError;
use crate::models::required;
use crate::models::transactions::{CreateDebit, Mode};

/// POST /api/transaction/debit — append a debit row to the ledger; admin
/// only. Credit rows are written by the payment webhook.
pub async fn create_debit(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateDebit>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let body = body.into_inner();
    let description = required(body.description, "description")?;
    let amount = required(body.amount, "amount")?;
    let contract_id = required(body.contract_id, "contract_id")?;

    let transaction =
        transaction_db::insert_debit(db.get_ref(), description, amount, contract_id).await?;
    Ok(HttpResponse::Created().json(transaction))
}

/// GET /api/transaction/user/{id} — every ledger row on contracts where the
/// user is a party (public, like the rest of the ledger reads).
pub async fn get_transactions_by_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rows = transaction_db::get_transactions_by_user(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/transaction/my-transactions — the caller's ledger view: clients
/// see only debit rows, lawyers see everything on their contracts.
pub async fn my_transactions(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let rows = transaction_db::get_transactions_by_user(db.get_ref(), auth.0.id).await?;

    let rows = if auth.0.role == Role::Client {
        transaction_db::filter_by_mode(rows, Mode::Debit)
    } else {
        rows
    };

    Ok(HttpResponse::Ok().json(rows))
}
