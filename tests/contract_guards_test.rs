//! Tests for the contract lifecycle guards. The guards are pure methods on
//! the entity model, so the whole state machine is checked without a database.
//!
//! Run with: `cargo test --test contract_guards_test`
use chrono::Utc;
use uuid::Uuid;

use lexmarket_backend::auth::access::{Identity, Role};
use lexmarket_backend::error::ApiError;
use lexmarket_backend::models::contracts;

fn contract(lawyer_id: Uuid, client_id: Uuid) -> contracts::Model {
    contracts::Model {
        id: Uuid::new_v4(),
        creator_id: lawyer_id,
        title: "Trademark registration".to_string(),
        description: "File and prosecute a trademark application".to_string(),
        price: 50_000,
        is_paid: false,
        paid_on: None,
        is_accepted: false,
        accepted_on: None,
        is_ended: false,
        ended_on: None,
        ended_reason: None,
        lawyer_id,
        client_id,
        review_id: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_accept_rules() {
    let lawyer = Uuid::new_v4();
    let client = Uuid::new_v4();
    let c = contract(lawyer, client);

    // The creator cannot accept their own contract.
    assert!(matches!(
        c.ensure_can_accept(lawyer),
        Err(ApiError::Unauthorized(_))
    ));
    // A stranger cannot accept either.
    assert!(matches!(
        c.ensure_can_accept(Uuid::new_v4()),
        Err(ApiError::Unauthorized(_))
    ));
    // The client can.
    assert!(c.ensure_can_accept(client).is_ok());

    // Accepting twice is a conflict.
    let mut accepted = c;
    accepted.is_accepted = true;
    assert!(matches!(
        accepted.ensure_can_accept(client),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn test_end_requires_payment_and_happens_once() {
    let lawyer = Uuid::new_v4();
    let client = Uuid::new_v4();
    let mut c = contract(lawyer, client);

    // Only the client may end.
    assert!(matches!(
        c.ensure_can_end(lawyer),
        Err(ApiError::Unauthorized(_))
    ));
    // Unpaid contracts cannot be ended.
    assert!(matches!(
        c.ensure_can_end(client),
        Err(ApiError::BadRequest(_))
    ));

    c.is_paid = true;
    assert!(c.ensure_can_end(client).is_ok());

    // Ending twice is a conflict.
    c.is_ended = true;
    assert!(matches!(
        c.ensure_can_end(client),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn test_paid_contracts_cannot_be_deleted() {
    let lawyer = Uuid::new_v4();
    let client = Uuid::new_v4();
    let mut c = contract(lawyer, client);

    let client_ident = Identity {
        id: client,
        role: Role::Client,
    };
    let stranger = Identity {
        id: Uuid::new_v4(),
        role: Role::Client,
    };
    let admin = Identity {
        id: Uuid::new_v4(),
        role: Role::Admin,
    };

    assert!(c.ensure_can_delete(&client_ident).is_ok());
    assert!(c.ensure_can_delete(&admin).is_ok());
    assert!(matches!(
        c.ensure_can_delete(&stranger),
        Err(ApiError::Unauthorized(_))
    ));

    // Once paid, nobody can delete — the ledger trail survives.
    c.is_paid = true;
    assert!(matches!(
        c.ensure_can_delete(&client_ident),
        Err(ApiError::Conflict(_))
    ));
    assert!(matches!(
        c.ensure_can_delete(&admin),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn test_payable_guard() {
    let mut c = contract(Uuid::new_v4(), Uuid::new_v4());
    assert!(c.ensure_payable().is_ok());

    c.price = 0;
    assert!(matches!(c.ensure_payable(), Err(ApiError::BadRequest(_))));

    c.price = 50_000;
    c.is_paid = true;
    assert!(matches!(c.ensure_payable(), Err(ApiError::Conflict(_))));
}

#[test]
fn test_review_guard() {
    let lawyer = Uuid::new_v4();
    let client = Uuid::new_v4();
    let mut c = contract(lawyer, client);
    c.is_paid = true;

    // Not ended yet.
    assert!(matches!(
        c.ensure_reviewable(client, lawyer),
        Err(ApiError::BadRequest(_))
    ));

    c.is_ended = true;
    assert!(c.ensure_reviewable(client, lawyer).is_ok());

    // Wrong client is an authorization failure, wrong lawyer a bad request.
    assert!(matches!(
        c.ensure_reviewable(Uuid::new_v4(), lawyer),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        c.ensure_reviewable(client, Uuid::new_v4()),
        Err(ApiError::BadRequest(_))
    ));

    // One review per contract.
    c.review_id = Some(Uuid::new_v4());
    assert!(matches!(
        c.ensure_reviewable(client, lawyer),
        Err(ApiError::Conflict(_))
    ));
}

#[test]
fn test_complaint_guard() {
    let lawyer = Uuid::new_v4();
    let client = Uuid::new_v4();
    let mut c = contract(lawyer, client);

    // Requires a paid and ended contract.
    assert!(matches!(
        c.ensure_complainable(client, lawyer),
        Err(ApiError::BadRequest(_))
    ));

    c.is_paid = true;
    c.is_ended = true;
    assert!(c.ensure_complainable(client, lawyer).is_ok());

    // The named pair must match the contract's parties.
    assert!(matches!(
        c.ensure_complainable(client, Uuid::new_v4()),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(
        c.ensure_complainable(Uuid::new_v4(), lawyer),
        Err(ApiError::Unauthorized(_))
    ));
}
