use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access::{self, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::config::AppConfig;
use crate::db::contracts as contract_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::contracts::{CheckoutRequest, CreateContract, EndContract};
use crate::models::required;
use crate::models::users;
use crate::payments::{self, PaymentClient, WebhookEvent};

/// POST /api/contract — a lawyer draws up a contract for a client.
///
/// The lawyer id comes from the JWT; the named client must exist and hold
/// the client role.
pub async fn create_contract(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Lawyer)?;

    let body = body.into_inner();
    let title = required(body.title, "title")?;
    let description = required(body.description, "description")?;
    let client_id = required(body.client_id, "client_id")?;
    let price = required(body.price, "price")?;

    let client = user_db::get_user_by_id(db.get_ref(), client_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Client {client_id}")))?;
    if client.role != users::Role::Client {
        return Err(ApiError::BadRequest(
            "The referenced user is not a client".to_string(),
        ));
    }

    let contract = contract_db::insert_contract(
        db.get_ref(),
        auth.0.id,
        client_id,
        title,
        description,
        price,
    )
    .await?;
    Ok(HttpResponse::Created().json(contract))
}

/// GET /api/contract — list every contract; admin only.
pub async fn get_contracts(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let contracts = contract_db::get_all_contracts(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

/// GET /api/contract/{id} — single contract; any authenticated caller.
pub async fn get_contract(
    _auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {id}")))?;
    Ok(HttpResponse::Ok().json(contract))
}

/// GET /api/contract/my-contracts — contracts where the caller is a party.
pub async fn my_contracts(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let contracts = contract_db::get_contracts_by_party(db.get_ref(), auth.0.id).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

/// GET /api/contract/user/{id} — contracts of a user; self or admin.
pub async fn get_contracts_by_user(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    access::require_self_or_admin(&auth.0, user_id)?;

    let contracts = contract_db::get_contracts_by_party(db.get_ref(), user_id).await?;
    Ok(HttpResponse::Ok().json(contracts))
}

/// POST /api/contract/accept/{id} — a party other than the creator
/// acknowledges the contract. Acceptance does not gate payment.
pub async fn accept_contract(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {id}")))?;

    contract.ensure_can_accept(auth.0.id)?;

    let updated = contract_db::accept_contract(db.get_ref(), contract).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// POST /api/contract/end-contract/{id} — the contract's client ends a paid
/// contract; mandatory ended_reason.
pub async fn end_contract(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<EndContract>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Client)?;
    let reason = required(body.into_inner().ended_reason, "ended_reason")?;

    let id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {id}")))?;

    contract.ensure_can_end(auth.0.id)?;

    let updated = contract_db::end_contract(db.get_ref(), contract, reason).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/contract/{id} — a party or an admin deletes an unpaid
/// contract. Paid contracts are kept to preserve the ledger trail.
pub async fn delete_contract(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {id}")))?;

    contract.ensure_can_delete(&auth.0)?;

    contract_db::delete_contract(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Contract {id} deleted"),
    })))
}

/// POST /api/contract/create-checkout-session — the contract's client starts
/// a hosted checkout; returns the gateway's payment URL.
pub async fn create_checkout_session(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    payment: web::Data<PaymentClient>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Client)?;

    let body = body.into_inner();
    let contract_id = required(body.contract_id, "contract_id")?;
    let success_url = required(body.success_url, "success_url")?;
    let cancel_url = required(body.cancel_url, "cancel_url")?;

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id}")))?;

    if contract.client_id != auth.0.id {
        return Err(ApiError::Unauthorized(
            "Only the contract's client can pay for it".to_string(),
        ));
    }
    contract.ensure_payable()?;

    let session = payment
        .create_checkout_session(&contract, &success_url, &cancel_url)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "session_id": session.id,
        "url": session.url,
    })))
}

/// POST /api/contract/webhook — payment gateway callback. No bearer auth;
/// the request authenticates through its signature header.
///
/// `checkout.session.completed` records the payment (idempotently — a
/// duplicate confirmation neither rewrites the flag nor appends a second
/// ledger row). Unhandled event types are acknowledged with 200.
pub async fn payment_webhook(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    payload: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let signature = req
        .headers()
        .get("gateway-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing signature header".to_string()))?;

    payments::verify_webhook_signature(&payload, signature, &config.payment_webhook_secret)?;

    let event: WebhookEvent = serde_json::from_slice(&payload)
        .map_err(|e| ApiError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    if event.event_type == "checkout.session.completed" {
        let contract_id = event
            .data
            .object
            .metadata
            .contract_id
            .ok_or_else(|| ApiError::BadRequest("Missing contract_id metadata".to_string()))?;

        let recorded = contract_db::record_payment(db.get_ref(), contract_id).await?;
        if recorded {
            tracing::info!("Payment recorded for contract {contract_id}");
        } else {
            tracing::info!("Duplicate payment confirmation for contract {contract_id} ignored");
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "received": true })))
}
