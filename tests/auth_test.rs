//! Integration test for access token issuance and validation.
//!
//! Tokens are minted and validated locally with the same HS256 secret the
//! server would use. No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use lexmarket_backend::auth::access::Role;
use lexmarket_backend::auth::jwt::{Claims, issue_token, validate_token};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_issued_token_round_trips() {
    let id = Uuid::new_v4();
    let token = issue_token(id, Role::Lawyer, TEST_SECRET, 7).expect("Token should be issued");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");
    assert_eq!(claims.sub, id);
    assert_eq!(claims.role, Role::Lawyer);
    assert!(claims.exp > claims.iat);

    let ident = claims.identity();
    assert_eq!(ident.id, id);
    assert_eq!(ident.role, Role::Lawyer);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4(),
        role: Role::Client,
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    assert!(validate_token(&token, TEST_SECRET).is_err());
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token(Uuid::new_v4(), Role::Client, TEST_SECRET, 7).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(validate_token("not.a.valid.jwt", TEST_SECRET).is_err());
}

#[test]
fn test_admin_roles_survive_the_round_trip() {
    let id = Uuid::nil();
    let token = issue_token(id, Role::SuperAdmin, TEST_SECRET, 1).unwrap();

    let claims = validate_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.sub, id);
    assert_eq!(claims.role, Role::SuperAdmin);
}
