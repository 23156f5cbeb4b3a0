//! Tests for the running rating aggregate kept on user rows.
//!
//! Run with: `cargo test --test rating_test`
use lexmarket_backend::models::users::RatingAggregate;

fn empty() -> RatingAggregate {
    RatingAggregate {
        total_ratings: 0,
        num_reviews: 0,
        average_rating: 0.0,
    }
}

#[test]
fn test_apply_accumulates() {
    let agg = empty().apply(4).apply(5);
    assert_eq!(agg.total_ratings, 9);
    assert_eq!(agg.num_reviews, 2);
    assert!((agg.average_rating - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_average_is_capped_at_five() {
    // Rating bounds are not enforced at the data layer, so the aggregate
    // clamps what it exposes.
    let agg = empty().apply(7);
    assert_eq!(agg.total_ratings, 7);
    assert!((agg.average_rating - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_revert_undoes_apply() {
    let agg = empty().apply(3).apply(5).revert(5);
    assert_eq!(agg.total_ratings, 3);
    assert_eq!(agg.num_reviews, 1);
    assert!((agg.average_rating - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_reverting_the_last_review_resets_to_zero() {
    let agg = empty().apply(4).revert(4);
    assert_eq!(agg.total_ratings, 0);
    assert_eq!(agg.num_reviews, 0);
    assert!((agg.average_rating - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_revert_never_goes_negative() {
    let agg = empty().revert(5);
    assert_eq!(agg.total_ratings, 0);
    assert_eq!(agg.num_reviews, 0);
    assert!((agg.average_rating - 0.0).abs() < f64::EPSILON);
}
