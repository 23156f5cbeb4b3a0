use chrono::Duration;
use sea_orm::*;
use uuid::Uuid;

use crate::models::otps::{self, OTP_TTL_MINUTES, Purpose};

/// Persist a freshly generated code with its five-minute expiry. Existing
/// rows for the email are left alone; verification always checks the newest.
pub async fn save_otp(
    db: &DatabaseConnection,
    email: &str,
    code: &str,
    purpose: Purpose,
) -> Result<otps::Model, DbErr> {
    let now = chrono::Utc::now();
    let otp = otps::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        code: Set(code.to_string()),
        purpose: Set(purpose),
        expires_at: Set(now + Duration::minutes(OTP_TTL_MINUTES)),
        created_at: Set(now),
    };

    otp.insert(db).await
}

/// The newest code for an email, regardless of purpose or expiry.
pub async fn newest_for_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<otps::Model>, DbErr> {
    otps::Entity::find()
        .filter(otps::Column::Email.eq(email))
        .order_by_desc(otps::Column::CreatedAt)
        .one(db)
        .await
}

/// Check a submitted code against the newest row for the email.
pub async fn verify_otp(
    db: &DatabaseConnection,
    email: &str,
    code: &str,
    purpose: Purpose,
) -> Result<bool, DbErr> {
    let newest = newest_for_email(db, email).await?;
    Ok(newest
        .map(|otp| otp.matches(code, purpose, chrono::Utc::now()))
        .unwrap_or(false))
}

/// Remove every code for an email — after successful verification, or when
/// the delivery mail could not be sent.
pub async fn purge_for_email(db: &DatabaseConnection, email: &str) -> Result<(), DbErr> {
    otps::Entity::delete_many()
        .filter(otps::Column::Email.eq(email))
        .exec(db)
        .await?;
    Ok(())
}
