//! Comprehensive tests for domain_claims

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

use core_kernel::{ClaimId, UserId};

use domain_claims::claim::{ClaimInput, ClaimRecord, ClaimType, ClaimView};
use domain_claims::codec::{decode_claim_value, encode_claim_values};
use domain_claims::merge::{distinct_in_order, merge_values};
use domain_claims::ClaimError;

fn values(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Codec Tests
// ============================================================================

mod codec_tests {
    use super::*;

    #[test]
    fn test_codec_is_lossless_with_duplicates() {
        let input = values(&["a", "a", "b"]);
        let decoded = decode_claim_value(&encode_claim_values(&input).unwrap()).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_codec_does_not_deduplicate() {
        let input = values(&["a", "a", "b"]);
        let decoded = decode_claim_value(&encode_claim_values(&input).unwrap()).unwrap();
        assert_ne!(decoded, distinct_in_order(input));
    }

    #[test]
    fn test_decode_error_maps_to_codec_variant() {
        let err = decode_claim_value("[\"unterminated").unwrap_err();
        assert!(matches!(err, ClaimError::Codec(_)));
    }
}

// ============================================================================
// Shape Conversion Tests
// ============================================================================

mod shape_tests {
    use super::*;

    fn record(values_blob: &str) -> ClaimRecord {
        ClaimRecord {
            id: ClaimId::new(7),
            user_id: UserId::new(42),
            claim_type: ClaimType::SubscriptionWhitelist,
            claim_value: values_blob.to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 11, 5, 10, 0, 0).unwrap(),
            updated_at: Some(Utc.with_ymd_and_hms(2023, 11, 6, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_view_carries_all_record_fields() {
        let view = ClaimView::try_from(record(r#"["sensors/#"]"#)).unwrap();

        assert_eq!(view.id, ClaimId::new(7));
        assert_eq!(view.user_id, UserId::new(42));
        assert_eq!(view.claim_type, ClaimType::SubscriptionWhitelist);
        assert_eq!(view.claim_values, values(&["sensors/#"]));
        assert!(view.updated_at.is_some());
    }

    #[test]
    fn test_record_view_roundtrip_keeps_blob() {
        let original = record(r#"["a","a","b"]"#);
        let view = ClaimView::try_from(original.clone()).unwrap();
        let back = ClaimRecord::try_from(view).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_view_display_includes_values() {
        let view = ClaimView::try_from(record(r#"["x","y"]"#)).unwrap();
        let text = view.to_string();
        assert!(text.contains("ClaimType: SubscriptionWhitelist"));
        assert!(text.contains("ClaimValues: [x, y]"));
    }

    #[test]
    fn test_view_into_input() {
        let view = ClaimView::try_from(record(r#"["x"]"#)).unwrap();
        let input: ClaimInput = view.into();
        assert_eq!(input, ClaimInput::new(UserId::new(42), ClaimType::SubscriptionWhitelist, values(&["x"])));
    }
}

// ============================================================================
// Merge Property Tests
// ============================================================================

fn value_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]/[0-3]", 0..12)
}

proptest! {
    #[test]
    fn prop_merge_is_superset_of_both(existing in value_list(), incoming in value_list()) {
        let merged = merge_values(existing.clone(), &incoming);
        let merged_set: HashSet<_> = merged.iter().collect();

        for value in existing.iter().chain(incoming.iter()) {
            prop_assert!(merged_set.contains(value));
        }
    }

    #[test]
    fn prop_merge_has_no_duplicates(existing in value_list(), incoming in value_list()) {
        let merged = merge_values(existing, &incoming);
        let unique: HashSet<_> = merged.iter().collect();
        prop_assert_eq!(unique.len(), merged.len());
    }

    #[test]
    fn prop_merge_is_distinct_of_concatenation(existing in value_list(), incoming in value_list()) {
        let merged = merge_values(existing.clone(), &incoming);

        let mut expected = Vec::new();
        for value in existing.into_iter().chain(incoming) {
            if !expected.contains(&value) {
                expected.push(value);
            }
        }
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn prop_codec_roundtrip(list in value_list()) {
        let decoded = decode_claim_value(&encode_claim_values(&list).unwrap()).unwrap();
        prop_assert_eq!(decoded, list);
    }
}
