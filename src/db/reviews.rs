use sea_orm::*;
use uuid::Uuid;

use crate::auth::access::{self, Identity};
use crate::error::ApiError;
use crate::models::contracts;
use crate::models::reviews;
use crate::models::users::{self, RatingAggregate};

/// Create a review for an ended contract.
///
/// Runs as one unit of work: the review row, both parties' rating aggregates
/// and the contract's review link are committed together, so partial
/// application can never leave aggregates inconsistent with review existence.
pub async fn create_review(
    db: &DatabaseConnection,
    contract_id: Uuid,
    client_id: Uuid,
    lawyer_id: Uuid,
    rating: i32,
    review_text: String,
) -> Result<reviews::Model, ApiError> {
    let txn = db.begin().await?;

    // Lock the contract row: two concurrent creates serialize here, so the
    // second one sees `review_id` set and fails the one-review guard instead
    // of double-applying the aggregates.
    let contract = contracts::Entity::find_by_id(contract_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id}")))?;

    contract.ensure_reviewable(client_id, lawyer_id)?;

    let now = chrono::Utc::now();
    let review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        rating: Set(rating),
        review_text: Set(review_text),
        client_id: Set(client_id),
        lawyer_id: Set(lawyer_id),
        created_at: Set(now),
        updated_at: Set(None),
    }
    .insert(&txn)
    .await?;

    apply_rating(&txn, client_id, rating).await?;
    apply_rating(&txn, lawyer_id, rating).await?;

    let mut active: contracts::ActiveModel = contract.into();
    active.review_id = Set(Some(review.id));
    active.updated_at = Set(Some(now));
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(review)
}

/// Delete a review and reverse both aggregates in the same unit of work.
/// Only the reviewing client or an admin may delete.
pub async fn delete_review(
    db: &DatabaseConnection,
    review_id: Uuid,
    ident: &Identity,
) -> Result<(), ApiError> {
    let txn = db.begin().await?;

    let review = reviews::Entity::find_by_id(review_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review {review_id}")))?;

    if review.client_id != ident.id && !access::is_any_admin(ident) {
        return Err(ApiError::Unauthorized(
            "Only the reviewing client or an admin can delete a review".to_string(),
        ));
    }

    revert_rating(&txn, review.client_id, review.rating).await?;
    revert_rating(&txn, review.lawyer_id, review.rating).await?;

    // Unlink the contract before the row goes away.
    if let Some(contract) = contracts::Entity::find()
        .filter(contracts::Column::ReviewId.eq(review_id))
        .lock_exclusive()
        .one(&txn)
        .await?
    {
        let mut active: contracts::ActiveModel = contract.into();
        active.review_id = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(&txn).await?;
    }

    reviews::Entity::delete_by_id(review_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

// The user row is fetched once, locked for the rest of the transaction, and
// handed straight to the write-back — the read-modify-write can't lose an
// update to a concurrent reviewer.
async fn apply_rating<C: ConnectionTrait>(conn: &C, user_id: Uuid, rating: i32) -> Result<(), DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("User {user_id} not found")))?;
    let aggregate = RatingAggregate::of(&user).apply(rating);
    crate::db::users::set_rating_aggregate(conn, user, aggregate).await
}

async fn revert_rating<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    rating: i32,
) -> Result<(), DbErr> {
    let user = users::Entity::find_by_id(user_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("User {user_id} not found")))?;
    let aggregate = RatingAggregate::of(&user).revert(rating);
    crate::db::users::set_rating_aggregate(conn, user, aggregate).await
}

pub async fn get_all_reviews(db: &DatabaseConnection) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_review_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find_by_id(id).one(db).await
}

pub async fn get_reviews_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::ClientId.eq(client_id))
        .all(db)
        .await
}

pub async fn get_reviews_by_lawyer(
    db: &DatabaseConnection,
    lawyer_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::LawyerId.eq(lawyer_id))
        .all(db)
        .await
}
