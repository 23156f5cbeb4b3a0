use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Error taxonomy for the whole API. Every handler returns
/// `Result<HttpResponse, ApiError>`; the `ResponseError` impl renders the
/// JSON body and status code at the boundary. No internal retries anywhere.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Duplicate email/username, duplicate review/complaint, room name collision.
    #[error("{0}")]
    Conflict(String),

    /// Role or ownership predicate failed on validated claims.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but not a member of the resource (chat rooms).
    #[error("{0}")]
    Forbidden(String),

    /// A state guard rejected the request (e.g. ending an unpaid contract).
    #[error("{0}")]
    BadRequest(String),

    /// Missing mandatory keys in the request body.
    #[error("{0}")]
    Validation(String),

    /// Payment gateway or mail delivery failure.
    #[error("{0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    pub fn missing_key(key: &str) -> Self {
        Self::Validation(format!("Missing mandatory key: {key}"))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}
