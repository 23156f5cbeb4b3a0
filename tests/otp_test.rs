//! Tests for one-time code generation and matching.
//!
//! Run with: `cargo test --test otp_test`
use chrono::{Duration, Utc};
use uuid::Uuid;

use lexmarket_backend::models::otps::{self, OTP_TTL_MINUTES, Purpose};

fn otp(code: &str, purpose: Purpose) -> otps::Model {
    let now = Utc::now();
    otps::Model {
        id: Uuid::new_v4(),
        email: "someone@example.com".to_string(),
        code: code.to_string(),
        purpose,
        expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        created_at: now,
    }
}

#[test]
fn test_generated_codes_are_six_digits() {
    for _ in 0..50 {
        let code = otps::generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_matching_code_and_purpose() {
    let row = otp("482913", Purpose::PasswordReset);
    let now = Utc::now();

    assert!(row.matches("482913", Purpose::PasswordReset, now));
    assert!(!row.matches("000000", Purpose::PasswordReset, now));
    // A reset code cannot verify an email.
    assert!(!row.matches("482913", Purpose::EmailVerify, now));
}

#[test]
fn test_expired_code_does_not_match() {
    let row = otp("482913", Purpose::EmailVerify);
    let after_expiry = row.expires_at + Duration::seconds(1);

    assert!(!row.matches("482913", Purpose::EmailVerify, after_expiry));
    // Exactly at the expiry instant still matches.
    assert!(row.matches("482913", Purpose::EmailVerify, row.expires_at));
}
