//! Tests for the skill-selection guard behind a lawyer's skill assignment.
//!
//! Run with: `cargo test --test skills_test`
use uuid::Uuid;

use lexmarket_backend::error::ApiError;
use lexmarket_backend::models::skills::{MAX_SKILLS_PER_LAWYER, ensure_selection_size};

fn ids(n: usize) -> Vec<Uuid> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn test_six_ids_are_rejected() {
    let selection = ids(MAX_SKILLS_PER_LAWYER + 1);
    assert!(matches!(
        ensure_selection_size(&selection),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn test_up_to_the_cap_passes() {
    assert!(ensure_selection_size(&ids(1)).is_ok());
    assert!(ensure_selection_size(&ids(MAX_SKILLS_PER_LAWYER)).is_ok());
}

#[test]
fn test_empty_selection_is_a_valid_clear() {
    assert!(ensure_selection_size(&[]).is_ok());
}
