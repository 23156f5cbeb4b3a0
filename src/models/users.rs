use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role stored as a lowercase string in the database. Lawyer- and
/// client-specific columns live inline on the `users` row; the API surfaces
/// them through the [`RoleDetails`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "lawyer")]
    Lawyer,
}

/// SeaORM entity for the `users` table.
///
/// One table for both roles — no join-table inheritance. The rating aggregate
/// (`total_ratings`, `num_reviews`, `average_rating`) is maintained by the
/// review db layer so averages never need recomputing from all reviews.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,

    // Account flags.
    pub is_active: bool,
    pub is_suspended: bool,
    pub is_verified: bool,
    pub status: Option<String>,
    pub reason: Option<String>,

    // Profile.
    pub profile_image: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub dob: Option<Date>,
    pub country: Option<String>,
    pub phone_number: Option<String>,

    pub role: Role,

    // Lawyer-specific.
    pub bar_association_id: Option<String>,
    pub experience_years: Option<i32>,
    // Client-specific.
    pub case_details: Option<String>,

    // Rating aggregate, updated alongside review creation/deletion.
    pub total_ratings: i32,
    pub num_reviews: i32,
    pub average_rating: f64,

    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Running rating aggregate kept on a user row. Pure arithmetic so the
/// invariant `avg == min(total/num, 5.0)` is testable without a database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub total_ratings: i32,
    pub num_reviews: i32,
    pub average_rating: f64,
}

impl RatingAggregate {
    pub fn of(user: &Model) -> Self {
        Self {
            total_ratings: user.total_ratings,
            num_reviews: user.num_reviews,
            average_rating: user.average_rating,
        }
    }

    /// Fold a new review rating into the aggregate.
    pub fn apply(self, rating: i32) -> Self {
        let total = self.total_ratings + rating;
        let num = self.num_reviews + 1;
        Self {
            total_ratings: total,
            num_reviews: num,
            average_rating: (f64::from(total) / f64::from(num)).min(5.0),
        }
    }

    /// Reverse a previously applied rating, e.g. when its review is deleted.
    /// When the last review goes away the average resets to zero.
    pub fn revert(self, rating: i32) -> Self {
        let total = (self.total_ratings - rating).max(0);
        let num = (self.num_reviews - 1).max(0);
        let average_rating = if num == 0 {
            0.0
        } else {
            (f64::from(total) / f64::from(num)).min(5.0)
        };
        Self {
            total_ratings: total,
            num_reviews: num,
            average_rating,
        }
    }
}

// ── DTOs ──

/// Role-specific payload surfaced by the API instead of raw nullable columns.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    Lawyer {
        bar_association_id: Option<String>,
        experience_years: Option<i32>,
    },
    Client {
        case_details: Option<String>,
    },
}

/// Request body for POST /api/users/lawyer and /api/users/client.
/// All fields optional so missing mandatory keys return 422, not 400.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub dob: Option<Date>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    /// When supplied without a country/address, triggers a best-effort
    /// reverse-geocoding lookup.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    // Lawyer-specific.
    pub bar_association_id: Option<String>,
    pub experience_years: Option<i32>,
    // Client-specific.
    pub case_details: Option<String>,
}

/// Fully validated registration payload handed to the db layer: mandatory
/// keys resolved, password hashed, country/address possibly geocoded.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub dob: Option<Date>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    pub role: Role,
    pub bar_association_id: Option<String>,
    pub experience_years: Option<i32>,
    pub case_details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub dob: Option<Date>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub profile_image: Option<String>,
    pub bar_association_id: Option<String>,
    pub experience_years: Option<i32>,
    pub case_details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePassword {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeactivateRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuspendRequest {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPassword {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPassword {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmail {
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// A safe user representation for API responses. Sensitive fields (password
/// hash, dob, phone number, status, reason) are never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub country: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    pub is_suspended: bool,
    pub is_verified: bool,
    pub details: RoleDetails,
    pub total_ratings: i32,
    pub num_reviews: i32,
    pub average_rating: f64,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        let details = match m.role {
            Role::Lawyer => RoleDetails::Lawyer {
                bar_association_id: m.bar_association_id,
                experience_years: m.experience_years,
            },
            Role::Client => RoleDetails::Client {
                case_details: m.case_details,
            },
        };
        Self {
            id: m.id,
            email: m.email,
            username: m.username,
            first_name: m.first_name,
            last_name: m.last_name,
            address: m.address,
            country: m.country,
            profile_image: m.profile_image,
            is_active: m.is_active,
            is_suspended: m.is_suspended,
            is_verified: m.is_verified,
            details,
            total_ratings: m.total_ratings,
            num_reviews: m.num_reviews,
            average_rating: m.average_rating,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
