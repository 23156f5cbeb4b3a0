//! Tests for payment webhook signature verification.
//!
//! Run with: `cargo test --test webhook_test`
use chrono::Utc;

use lexmarket_backend::payments::{sign_webhook_payload, verify_webhook_signature};

const SECRET: &str = "whsec_test_secret";

#[test]
fn test_valid_signature_passes() {
    let payload = br#"{"type":"checkout.session.completed","data":{"object":{"metadata":{}}}}"#;
    let header = sign_webhook_payload(payload, Utc::now().timestamp(), SECRET);

    assert!(verify_webhook_signature(payload, &header, SECRET).is_ok());
}

#[test]
fn test_wrong_secret_fails() {
    let payload = br#"{"type":"checkout.session.completed"}"#;
    let header = sign_webhook_payload(payload, Utc::now().timestamp(), "whsec_other");

    assert!(verify_webhook_signature(payload, &header, SECRET).is_err());
}

#[test]
fn test_tampered_payload_fails() {
    let payload = br#"{"amount":100}"#;
    let header = sign_webhook_payload(payload, Utc::now().timestamp(), SECRET);

    let tampered = br#"{"amount":999}"#;
    assert!(verify_webhook_signature(tampered, &header, SECRET).is_err());
}

#[test]
fn test_tampered_timestamp_fails() {
    let payload = br#"{"amount":100}"#;
    let ts = Utc::now().timestamp();
    let header = sign_webhook_payload(payload, ts, SECRET);

    // Swap the timestamp while keeping the original MAC.
    let forged = header.replacen(&format!("t={ts}"), &format!("t={}", ts + 1), 1);
    assert!(verify_webhook_signature(payload, &forged, SECRET).is_err());
}

#[test]
fn test_malformed_headers_fail() {
    let payload = br#"{}"#;

    for header in ["", "garbage", "t=123", "v1=deadbeef", "t=,v1="] {
        assert!(
            verify_webhook_signature(payload, header, SECRET).is_err(),
            "header {header:?} should be rejected"
        );
    }
}
