use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::admins::{self, AdminRole, UpdateAdmin};

/// Insert a new admin, rejecting duplicate email with 409.
pub async fn insert_admin(
    db: &DatabaseConnection,
    email: String,
    password_hash: String,
    phone_number: Option<String>,
) -> Result<admins::Model, ApiError> {
    if find_by_email(db, &email).await?.is_some() {
        return Err(ApiError::Conflict(
            "An admin with this email already exists".to_string(),
        ));
    }

    let new_admin = admins::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        phone_number: Set(phone_number),
        is_active: Set(true),
        role: Set(AdminRole::Admin),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    Ok(new_admin.insert(db).await?)
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<admins::Model>, DbErr> {
    admins::Entity::find()
        .filter(admins::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn get_admin_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<admins::Model>, DbErr> {
    admins::Entity::find_by_id(id).one(db).await
}

pub async fn get_all_admins(db: &DatabaseConnection) -> Result<Vec<admins::Model>, DbErr> {
    admins::Entity::find().all(db).await
}

pub async fn update_admin(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateAdmin,
    password_hash: Option<String>,
) -> Result<admins::Model, ApiError> {
    let admin = admins::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Admin {id}")))?;

    let mut active: admins::ActiveModel = admin.into();

    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    Ok(active.update(db).await?)
}

pub async fn delete_admin(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    admins::Entity::delete_by_id(id).exec(db).await
}

/// Guarantee the single super-admin exists. Runs at startup; the fixed nil
/// UUID makes the bootstrap idempotent across restarts.
pub async fn bootstrap_super_admin(
    db: &DatabaseConnection,
    email: &str,
    password_hash: String,
) -> Result<(), DbErr> {
    let id = Uuid::nil();
    if admins::Entity::find_by_id(id).one(db).await?.is_some() {
        return Ok(());
    }

    let super_admin = admins::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        phone_number: Set(None),
        is_active: Set(true),
        role: Set(AdminRole::SuperAdmin),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };
    super_admin.insert(db).await?;

    tracing::info!("Bootstrapped super-admin account ({email})");
    Ok(())
}
