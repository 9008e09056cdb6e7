//! Unit tests for the identifier newtypes

use core_kernel::{ClaimId, UserId};
use proptest::prelude::*;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        let id = ClaimId::new(12);
        assert_eq!(id.value(), 12);
        assert_eq!(ClaimId::from(id.value()), id);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let id: ClaimId = " 8 ".parse().unwrap();
        assert_eq!(id, ClaimId::new(8));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert!("abc".parse::<ClaimId>().is_err());
        assert!("".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_ordering_follows_value() {
        assert!(ClaimId::new(1) < ClaimId::new(2));
    }
}

mod user_id_tests {
    use super::*;

    #[test]
    fn test_entity_name() {
        assert_eq!(UserId::entity(), "User");
    }

    #[test]
    fn test_json_is_number() {
        let json = serde_json::to_value(UserId::new(3)).unwrap();
        assert_eq!(json, serde_json::json!(3));
    }
}

proptest! {
    #[test]
    fn prop_display_parse_roundtrip(raw in any::<i64>()) {
        let id = ClaimId::new(raw);
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
