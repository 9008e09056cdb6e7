//! Property-Based Test Generators
//!
//! Proptest strategies for claim data. Value alphabets are kept small so
//! generated lists collide often and merge paths see duplicates.

use proptest::prelude::*;

use core_kernel::UserId;
use domain_claims::{ClaimInput, ClaimType};

/// Strategy for any claim type
pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    prop::sample::select(ClaimType::ALL.to_vec())
}

/// Strategy for user ids in a narrow range
pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
    (1i64..5).prop_map(UserId::new)
}

/// Strategy for MQTT-style topic values
pub fn topic_strategy() -> impl Strategy<Value = String> {
    "(sensors|devices|alerts)/[a-c]/(#|\\+|temp)"
}

/// Strategy for value lists, duplicates allowed
pub fn claim_values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(topic_strategy(), 0..8)
}

/// Strategy for complete claim inputs
pub fn claim_input_strategy() -> impl Strategy<Value = ClaimInput> {
    (user_id_strategy(), claim_type_strategy(), claim_values_strategy())
        .prop_map(|(user_id, claim_type, values)| ClaimInput::new(user_id, claim_type, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_topics_are_two_level_or_deeper(topic in topic_strategy()) {
            prop_assert!(topic.split('/').count() >= 3);
        }

        #[test]
        fn test_inputs_stay_in_range(input in claim_input_strategy()) {
            prop_assert!(input.user_id.value() >= 1 && input.user_id.value() < 5);
            prop_assert!(input.claim_values.len() < 8);
        }
    }
}
