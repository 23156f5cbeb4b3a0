use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access::{self, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::complaints as complaint_db;
use crate::error::ApiError;
use crate::models::complaints::{CreateComplaint, ResolveComplaint};
use crate::models::required;

/// POST /api/complaint — a client files a complaint against a paid, ended
/// contract. One complaint per (contract, creator) pair.
pub async fn create_complaint(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateComplaint>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Client)?;

    let body = body.into_inner();
    let subject = required(body.subject, "subject")?;
    let description = required(body.description, "description")?;
    let contract_id = required(body.contract_id, "contract_id")?;
    let lawyer_id = required(body.lawyer_id, "lawyer_id")?;

    let complaint = complaint_db::create_complaint(
        db.get_ref(),
        auth.0.id,
        subject,
        description,
        contract_id,
        auth.0.id,
        lawyer_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(complaint))
}

/// PUT /api/complaint/{id} — admin resolution; mandatory status, optional
/// details, optional `completed` marking the complaint resolved.
pub async fn resolve_complaint(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ResolveComplaint>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let body = body.into_inner();
    let status = required(body.status, "status")?;

    let complaint = complaint_db::resolve_complaint(
        db.get_ref(),
        path.into_inner(),
        auth.0.id,
        status,
        body.details,
        body.completed.unwrap_or(false),
    )
    .await?;

    Ok(HttpResponse::Ok().json(complaint))
}

/// GET /api/complaint — all complaints; admin only.
pub async fn get_complaints(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let complaints = complaint_db::get_all_complaints(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(complaints))
}

/// GET /api/complaint/{id} — single complaint; any authenticated caller.
pub async fn get_complaint(
    _auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let complaint = complaint_db::get_complaint_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Complaint {id}")))?;
    Ok(HttpResponse::Ok().json(complaint))
}

/// GET /api/complaint/user/{id} — complaints filed by a user; self or admin.
pub async fn get_complaints_by_user(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    access::require_self_or_admin(&auth.0, user_id)?;

    let complaints = complaint_db::get_complaints_by_user(db.get_ref(), user_id).await?;
    Ok(HttpResponse::Ok().json(complaints))
}
