pub mod admins;
pub mod chat_rooms;
pub mod complaints;
pub mod contracts;
pub mod messages;
pub mod otps;
pub mod reviews;
pub mod skills;
pub mod transactions;
pub mod users;

use serde::Deserialize;

use crate::error::ApiError;

/// Unwrap a mandatory request-body key, rejecting with 422 when absent.
/// Request DTOs keep every field optional so that a missing key surfaces as a
/// validation error instead of a deserialization failure.
pub fn required<T>(value: Option<T>, key: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_key(key))
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
