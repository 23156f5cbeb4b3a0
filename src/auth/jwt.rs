use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::access::{Identity, Role};
use crate::error::ApiError;

/// Access token claims, HS256-signed with the configured secret.
///
/// `sub` is the user or admin UUID; `role` distinguishes the two identity
/// spaces. Claims are trusted after signature and expiry validation — the
/// extractor never hits the database.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub,
            role: self.role,
        }
    }
}

/// Mint an access token for a user or admin login.
pub fn issue_token(
    id: Uuid,
    role: Role,
    secret: &str,
    ttl_days: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: id,
        role,
        exp: (now + Duration::days(ttl_days)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to issue token: {e}")))
}

/// Validate a token's signature and expiry and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|td| td.claims)
    .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))
}
