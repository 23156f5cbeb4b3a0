use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access::{self, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::skills as skill_db;
use crate::error::ApiError;
use crate::models::required;
use crate::models::skills::{AssignSkills, CreateSkill};

/// POST /api/skill — create a skill in the catalogue; admin only.
pub async fn create_skill(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateSkill>,
) -> Result<HttpResponse, ApiError> {
    access::require_any_admin(&auth.0)?;

    let name = required(body.into_inner().name, "name")?;
    let skill = skill_db::insert_skill(db.get_ref(), name).await?;
    Ok(HttpResponse::Created().json(skill))
}

/// GET /api/skill — the whole catalogue (public).
pub async fn get_skills(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let skills = skill_db::get_all_skills(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(skills))
}

/// PUT /api/skill/my-skills — a lawyer replaces their own skill set. An
/// empty list clears it.
pub async fn assign_skills(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<AssignSkills>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Lawyer)?;

    let skill_ids = body.into_inner().skill_ids.unwrap_or_default();
    skill_db::set_lawyer_skills(db.get_ref(), auth.0.id, skill_ids).await?;

    let skills = skill_db::get_lawyer_skills(db.get_ref(), auth.0.id).await?;
    Ok(HttpResponse::Ok().json(skills))
}

/// GET /api/skill/my-skills — the calling lawyer's skills.
pub async fn my_skills(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Lawyer)?;

    let skills = skill_db::get_lawyer_skills(db.get_ref(), auth.0.id).await?;
    Ok(HttpResponse::Ok().json(skills))
}

/// GET /api/skill/lawyer/{id} — skills of one lawyer (public).
pub async fn get_lawyer_skills(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let skills = skill_db::get_lawyer_skills(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skills))
}

/// GET /api/skill/{id}/lawyers — lawyers carrying a skill (public).
pub async fn get_lawyers_by_skill(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let lawyers = skill_db::get_lawyers_by_skill(db.get_ref(), path.into_inner()).await?;
    let lawyers: Vec<_> = lawyers
        .into_iter()
        .map(crate::models::users::UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(lawyers))
}

/// GET /api/skill/map — lawyer id → skill names across all lawyers (public).
pub async fn get_skill_map(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let map = skill_db::get_skill_map(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(map))
}
