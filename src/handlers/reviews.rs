use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::access::{self, Role};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::reviews as review_db;
use crate::error::ApiError;
use crate::models::required;
use crate::models::reviews::CreateReview;

/// POST /api/review — the contract's client reviews an ended contract.
///
/// The review row, both parties' rating aggregates and the contract linkage
/// commit as one unit of work in the db layer.
pub async fn create_review(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, ApiError> {
    access::require_role(&auth.0, Role::Client)?;

    let body = body.into_inner();
    let contract_id = required(body.contract_id, "contract_id")?;
    let lawyer_id = required(body.lawyer_id, "lawyer_id")?;
    let rating = required(body.rating, "rating")?;
    let review_text = required(body.review_text, "review_text")?;

    let review = review_db::create_review(
        db.get_ref(),
        contract_id,
        auth.0.id,
        lawyer_id,
        rating,
        review_text,
    )
    .await?;

    Ok(HttpResponse::Created().json(review))
}

/// DELETE /api/review/{id} — the reviewing client or an admin; reverses both
/// aggregates in the same unit of work.
pub async fn delete_review(
    auth: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    review_db::delete_review(db.get_ref(), id, &auth.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Review {id} deleted"),
    })))
}

/// GET /api/review — all reviews (public).
pub async fn get_reviews(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let reviews = review_db::get_all_reviews(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// GET /api/review/{id} — single review (public).
pub async fn get_review(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let review = review_db::get_review_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review {id}")))?;
    Ok(HttpResponse::Ok().json(review))
}

/// GET /api/review/client/{id} — reviews written by a client (public).
pub async fn get_reviews_by_client(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let reviews = review_db::get_reviews_by_client(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

/// GET /api/review/lawyer/{id} — reviews received by a lawyer (public).
pub async fn get_reviews_by_lawyer(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let reviews = review_db::get_reviews_by_lawyer(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
