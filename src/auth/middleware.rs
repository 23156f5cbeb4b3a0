use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use crate::auth::access::Identity;
use crate::auth::jwt;
use crate::config::AppConfig;

/// Extractor yielding the caller's validated claims.
///
/// Pulls the bearer token from the `Authorization` header and validates it
/// against the configured HS256 secret. No database round trip — the claims
/// are trusted once signature and expiry checks pass.
pub struct AuthenticatedUser(pub Identity);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            let config = req.app_data::<web::Data<AppConfig>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("App config not configured")
            })?;

            let claims = jwt::validate_token(token, &config.jwt_secret)?;

            Ok(AuthenticatedUser(claims.identity()))
        })
    }
}
