use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access;
use crate::auth::jwt;
use crate::auth::middleware::AuthenticatedUser;
use crate::config::AppConfig;
use crate::db::otps as otp_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::geo;
use crate::mailer::Mailer;
use crate::models::otps::{self, Purpose};
use crate::models::required;
use crate::models::users::{
    ChangePassword, DeactivateRequest, ForgotPassword, LoginRequest, NewUser, RegisterUser,
    ResetPassword, Role, SuspendRequest, UpdateUser, UserResponse, VerifyEmail,
};
use crate::models::PaginationQuery;

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Shared registration path for POST /api/users/lawyer and /api/users/client.
///
/// When coordinates are supplied without a country, a best-effort
/// reverse-geocoding lookup fills it in; failures are ignored.
async fn register(
    db: &DatabaseConnection,
    body: RegisterUser,
    role: Role,
) -> Result<HttpResponse, ApiError> {
    let email = required(body.email, "email")?;
    let username = required(body.username, "username")?;
    let password = required(body.password, "password")?;
    let first_name = required(body.first_name, "first_name")?;
    let last_name = required(body.last_name, "last_name")?;
    let address = required(body.address, "address")?;

    let mut country = body.country;
    if country.is_none() {
        if let (Some(lat), Some(lon)) = (body.latitude, body.longitude) {
            if let Some(geo) = geo::reverse_geocode(lat, lon).await {
                country = geo.country;
            }
        }
    }

    let input = NewUser {
        email,
        username,
        password_hash: hash_password(&password)?,
        first_name,
        last_name,
        address,
        dob: body.dob,
        country,
        phone_number: body.phone_number,
        profile_image: body.profile_image,
        role,
        bar_association_id: body.bar_association_id,
        experience_years: body.experience_years,
        case_details: body.case_details,
    };

    let user = user_db::insert_user(db, input).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /api/users/lawyer — register a new lawyer.
pub async fn register_lawyer(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    register(db.get_ref(), body.into_inner(), Role::Lawyer).await
}

/// POST /api/users/client — register a new client.
pub async fn register_client(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    register(db.get_ref(), body.into_inner(), Role::Client).await
}

/// POST /api/users/login — exchange credentials for an access token carrying
/// `{id, role}`.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let user = user_db::find_by_email(db.get_ref(), &email).await?;
    let user = match user {
        Some(u) if verify_password(&password, &u.password_hash) => u,
        _ => return Err(ApiError::Unauthorized("Invalid credentials".to_string())),
    };

    let token = jwt::issue_token(
        user.id,
        user.role.into(),
        &config.jwt_secret,
        config.token_ttl_days,
    )?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "access_token": token })))
}

/// GET /api/users — list all users, admin only.
pub async fn get_users(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let users = user_db::get_users_paginated(db.get_ref(), query.page(), query.limit()).await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/lawyer — list all lawyers (public).
pub async fn get_lawyers(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let lawyers = user_db::get_users_by_role(db.get_ref(), Role::Lawyer).await?;
    let response: Vec<UserResponse> = lawyers.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/client — list all clients (public).
pub async fn get_clients(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let clients = user_db::get_users_by_role(db.get_ref(), Role::Client).await?;
    let response: Vec<UserResponse> = clients.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id} — public profile, sensitive fields omitted.
pub async fn get_user(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let user = user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/users/{id} — update a user; self or admin.
pub async fn update_user(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_self_or_admin(&auth.0, id)?;

    let updated = user_db::update_user(db.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/users/{id} — delete a user; self or admin. Role-specific
/// columns live inline on the row, so nothing dangles.
pub async fn delete_user(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_self_or_admin(&auth.0, id)?;

    let result = user_db::delete_user(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("User {id}")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User {id} deleted"),
    })))
}

/// POST /api/users/de-activate/{id} — self or admin; the reason is recorded.
pub async fn deactivate(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<DeactivateRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_self_or_admin(&auth.0, id)?;
    let reason = required(body.into_inner().reason, "reason")?;

    let user = user_db::set_active(db.get_ref(), id, false, Some(reason)).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/users/activate/{id} — self or admin.
pub async fn activate(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_self_or_admin(&auth.0, id)?;

    let user = user_db::set_active(db.get_ref(), id, true, None).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/users/suspend/{id} — admin only; mandatory status.
pub async fn suspend(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SuspendRequest>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;
    let id = path.into_inner();
    let body = body.into_inner();
    let status = required(body.status, "status")?;

    let user = user_db::set_suspended(db.get_ref(), id, true, Some(status), body.reason).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/users/un-suspend/{id} — admin only.
pub async fn unsuspend(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;
    let id = path.into_inner();

    let user = user_db::set_suspended(db.get_ref(), id, false, None, None).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/users/change-password/{id} — self or admin; the old password
/// must verify before the new one is stored.
pub async fn change_password(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ChangePassword>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    access::require_self_or_admin(&auth.0, id)?;

    let body = body.into_inner();
    let old_password = required(body.old_password, "old_password")?;
    let new_password = required(body.new_password, "new_password")?;

    let user = user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    if !verify_password(&old_password, &user.password_hash) {
        return Err(ApiError::BadRequest("Old password is incorrect".to_string()));
    }

    user_db::set_password_hash(db.get_ref(), id, hash_password(&new_password)?).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Password changed successfully",
    })))
}

/// Generate, persist and mail a code. On mail failure the just-created OTP
/// rows are purged rather than retried.
async fn issue_otp(
    db: &DatabaseConnection,
    mailer: &Mailer,
    email: &str,
    purpose: Purpose,
) -> Result<(), ApiError> {
    let code = otps::generate_code();
    otp_db::save_otp(db, email, &code, purpose).await?;

    if let Err(e) = mailer.send_otp(email, &code, purpose).await {
        otp_db::purge_for_email(db, email).await?;
        return Err(e);
    }
    Ok(())
}

/// POST /api/users/forgot-password — mail a password-reset code.
pub async fn forgot_password(
    db: web::Data<DatabaseConnection>,
    mailer: web::Data<Mailer>,
    body: web::Json<ForgotPassword>,
) -> Result<HttpResponse, ApiError> {
    let email = required(body.into_inner().email, "email")?;

    // The account must exist, but don't reveal more than the original did.
    user_db::find_by_email(db.get_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User with email {email}")))?;

    issue_otp(db.get_ref(), mailer.get_ref(), &email, Purpose::PasswordReset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "OTP sent to your email",
    })))
}

/// POST /api/users/reset-password — verify the newest unexpired code and
/// store the new hash; all codes for the email are purged on success.
pub async fn reset_password(
    db: web::Data<DatabaseConnection>,
    body: web::Json<ResetPassword>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let email = required(body.email, "email")?;
    let otp = required(body.otp, "otp")?;
    let new_password = required(body.new_password, "new_password")?;

    if !otp_db::verify_otp(db.get_ref(), &email, &otp, Purpose::PasswordReset).await? {
        return Err(ApiError::BadRequest("Invalid or expired OTP".to_string()));
    }

    let user = user_db::find_by_email(db.get_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User with email {email}")))?;

    user_db::set_password_hash(db.get_ref(), user.id, hash_password(&new_password)?).await?;
    otp_db::purge_for_email(db.get_ref(), &email).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Password reset successfully",
    })))
}

/// POST /api/users/request-verification — mail an email-verification code.
pub async fn request_verification(
    db: web::Data<DatabaseConnection>,
    mailer: web::Data<Mailer>,
    body: web::Json<ForgotPassword>,
) -> Result<HttpResponse, ApiError> {
    let email = required(body.into_inner().email, "email")?;

    user_db::find_by_email(db.get_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User with email {email}")))?;

    issue_otp(db.get_ref(), mailer.get_ref(), &email, Purpose::EmailVerify).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Verification code sent to your email",
    })))
}

/// POST /api/users/verify-email — mark the account verified and purge the
/// email's codes.
pub async fn verify_email(
    db: web::Data<DatabaseConnection>,
    body: web::Json<VerifyEmail>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let email = required(body.email, "email")?;
    let otp = required(body.otp, "otp")?;

    if !otp_db::verify_otp(db.get_ref(), &email, &otp, Purpose::EmailVerify).await? {
        return Err(ApiError::BadRequest("Invalid or expired OTP".to_string()));
    }

    let user = user_db::set_verified(db.get_ref(), &email).await?;
    otp_db::purge_for_email(db.get_ref(), &email).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
