use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access;
use crate::auth::jwt;
use crate::auth::middleware::AuthenticatedUser;
use crate::config::AppConfig;
use crate::db::admins as admin_db;
use crate::error::ApiError;
use crate::models::admins::{CreateAdmin, UpdateAdmin};
use crate::models::required;
use crate::models::users::LoginRequest;

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
}

/// POST /api/admin — create a new admin; super-admin only.
pub async fn create_admin(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateAdmin>,
) -> Result<HttpResponse, ApiError> {
    access::require_super_admin(&auth.0)?;

    let body = body.into_inner();
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let admin =
        admin_db::insert_admin(db.get_ref(), email, hash_password(&password)?, body.phone_number)
            .await?;
    Ok(HttpResponse::Created().json(admin))
}

/// POST /api/admin/login — same token shape as user logins.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let admin = admin_db::find_by_email(db.get_ref(), &email).await?;
    let admin = match admin {
        Some(a) if bcrypt::verify(&password, &a.password_hash).unwrap_or(false) => a,
        _ => return Err(ApiError::Unauthorized("Invalid credentials".to_string())),
    };

    let token = jwt::issue_token(
        admin.id,
        admin.role.into(),
        &config.jwt_secret,
        config.token_ttl_days,
    )?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "access_token": token })))
}

/// GET /api/admin — list all admins; any admin.
pub async fn get_admins(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let admins = admin_db::get_all_admins(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(admins))
}

/// GET /api/admin/{id} — any admin.
pub async fn get_admin(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;
    let id = path.into_inner();

    let admin = admin_db::get_admin_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Admin {id}")))?;
    Ok(HttpResponse::Ok().json(admin))
}

/// PUT /api/admin/{id} — super-admin or the admin itself.
pub async fn update_admin(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAdmin>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_super_or_self_admin(&auth.0, id)?;

    let body = body.into_inner();
    let password_hash = match &body.password {
        Some(p) => Some(hash_password(p)?),
        None => None,
    };

    let admin = admin_db::update_admin(db.get_ref(), id, body, password_hash).await?;
    Ok(HttpResponse::Ok().json(admin))
}

/// DELETE /api/admin/{id} — super-admin or the admin itself.
pub async fn delete_admin(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_super_or_self_admin(&auth.0, id)?;

    let result = admin_db::delete_admin(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Admin {id}")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Admin {id} deleted"),
    })))
}
