use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// OTP lifetime: codes expire five minutes after issuance.
pub const OTP_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
pub enum Purpose {
    #[sea_orm(string_value = "password-reset")]
    PasswordReset,
    #[sea_orm(string_value = "email-verify")]
    EmailVerify,
}

/// SeaORM entity for the `otps` table. Multiple rows may exist per email;
/// verification checks the newest and all rows for the email are purged after
/// a successful check (or when the delivery mail fails).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "otps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub purpose: Purpose,
    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A code matches when it equals the stored one, serves the same purpose,
    /// and has not expired at `now`.
    pub fn matches(&self, code: &str, purpose: Purpose, now: DateTime<Utc>) -> bool {
        self.code == code && self.purpose == purpose && now <= self.expires_at
    }
}

/// Generate a 6-digit numeric code.
pub fn generate_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..10).to_string()).collect()
}
