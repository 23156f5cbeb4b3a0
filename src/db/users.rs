use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::users::{self, NewUser, RatingAggregate, Role, UpdateUser};

/// Insert a new user, rejecting duplicate email or username with 409.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: NewUser,
) -> Result<users::Model, ApiError> {
    if find_by_email(db, &input.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }
    if find_by_username(db, &input.username).await?.is_some() {
        return Err(ApiError::Conflict(
            "A user with this username already exists".to_string(),
        ));
    }

    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email),
        username: Set(input.username),
        password_hash: Set(input.password_hash),
        is_active: Set(false),
        is_suspended: Set(false),
        is_verified: Set(false),
        status: Set(None),
        reason: Set(None),
        profile_image: Set(input.profile_image),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        address: Set(Some(input.address)),
        dob: Set(input.dob),
        country: Set(input.country),
        phone_number: Set(input.phone_number),
        role: Set(input.role),
        bar_association_id: Set(input.bar_association_id),
        experience_years: Set(input.experience_years),
        case_details: Set(input.case_details),
        total_ratings: Set(0),
        num_reviews: Set(0),
        average_rating: Set(0.0),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_user.insert(db).await?)
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

pub async fn get_users_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

pub async fn get_users_by_role(
    db: &DatabaseConnection,
    role: Role,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .all(db)
        .await
}

/// Update profile fields; role-specific columns are applied regardless of
/// role and simply stay NULL for the other variant.
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUser,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(username) = input.username {
        active.username = Set(username);
    }
    if let Some(first_name) = input.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = input.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(dob) = input.dob {
        active.dob = Set(Some(dob));
    }
    if let Some(country) = input.country {
        active.country = Set(Some(country));
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(profile_image) = input.profile_image {
        active.profile_image = Set(Some(profile_image));
    }
    if let Some(bar_association_id) = input.bar_association_id {
        active.bar_association_id = Set(Some(bar_association_id));
    }
    if let Some(experience_years) = input.experience_years {
        active.experience_years = Set(Some(experience_years));
    }
    if let Some(case_details) = input.case_details {
        active.case_details = Set(Some(case_details));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}

/// Activate or deactivate an account; the reason is recorded on deactivation.
pub async fn set_active(
    db: &DatabaseConnection,
    id: Uuid,
    active: bool,
    reason: Option<String>,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    let mut model: users::ActiveModel = user.into();
    model.is_active = Set(active);
    if let Some(reason) = reason {
        model.reason = Set(Some(reason));
    }
    model.updated_at = Set(Some(chrono::Utc::now()));

    Ok(model.update(db).await?)
}

/// Suspend or unsuspend an account (admin action).
pub async fn set_suspended(
    db: &DatabaseConnection,
    id: Uuid,
    suspended: bool,
    status: Option<String>,
    reason: Option<String>,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    let mut model: users::ActiveModel = user.into();
    model.is_suspended = Set(suspended);
    model.status = Set(status);
    if let Some(reason) = reason {
        model.reason = Set(Some(reason));
    }
    model.updated_at = Set(Some(chrono::Utc::now()));

    Ok(model.update(db).await?)
}

pub async fn set_password_hash(
    db: &DatabaseConnection,
    id: Uuid,
    password_hash: String,
) -> Result<users::Model, ApiError> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

    let mut model: users::ActiveModel = user.into();
    model.password_hash = Set(password_hash);
    model.updated_at = Set(Some(chrono::Utc::now()));

    Ok(model.update(db).await?)
}

pub async fn set_verified(db: &DatabaseConnection, email: &str) -> Result<users::Model, ApiError> {
    let user = find_by_email(db, email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User with email {email}")))?;

    let mut model: users::ActiveModel = user.into();
    model.is_verified = Set(true);
    model.updated_at = Set(Some(chrono::Utc::now()));

    Ok(model.update(db).await?)
}

/// Write back a rating aggregate onto a row the caller already fetched (and
/// locked) inside its transaction. Generic over the connection so review
/// creation/deletion can run it under `db.begin()`.
pub async fn set_rating_aggregate<C: ConnectionTrait>(
    conn: &C,
    user: users::Model,
    aggregate: RatingAggregate,
) -> Result<(), DbErr> {
    let mut model: users::ActiveModel = user.into();
    model.total_ratings = Set(aggregate.total_ratings);
    model.num_reviews = Set(aggregate.num_reviews);
    model.average_rating = Set(aggregate.average_rating);
    model.updated_at = Set(Some(chrono::Utc::now()));

    model.update(conn).await?;
    Ok(())
}
