//! Custom Test Assertions
//!
//! Assertion helpers for claim values and views with messages that show
//! the offending list.

use std::collections::HashSet;

use domain_claims::{ClaimInput, ClaimView};

/// Asserts that a value list has no repeated entries
///
/// # Panics
///
/// Panics naming the first repeated value
pub fn assert_distinct(values: &[String]) {
    let mut seen = HashSet::new();
    for value in values {
        assert!(
            seen.insert(value),
            "Expected distinct values, '{}' repeats in {:?}",
            value,
            values
        );
    }
}

/// Asserts that `values` contains every entry of `expected`, ignoring order
pub fn assert_contains_all(values: &[String], expected: &[String]) {
    for value in expected {
        assert!(
            values.contains(value),
            "Expected '{}' in {:?}",
            value,
            values
        );
    }
}

/// Asserts that a view belongs to the same slot as an input and carries
/// exactly the given values
pub fn assert_view_matches(view: &ClaimView, input: &ClaimInput, values: &[String]) {
    assert_eq!(view.user_id, input.user_id, "user id mismatch in {}", view);
    assert_eq!(view.claim_type, input.claim_type, "claim type mismatch in {}", view);
    assert_eq!(view.claim_values, values, "value mismatch in {}", view);
}

/// Asserts that a view was modified after creation
pub fn assert_touched(view: &ClaimView) {
    match view.updated_at {
        Some(updated) => assert!(
            updated >= view.created_at,
            "updated_at {} precedes created_at {}",
            updated,
            view.created_at
        ),
        None => panic!("Expected updated_at to be set on {}", view),
    }
}
