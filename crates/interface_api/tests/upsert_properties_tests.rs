//! Property tests for upsert merging through the service the API serves

use domain_claims::merge::distinct_in_order;
use proptest::prelude::*;
use test_utils::{
    assert_distinct, assert_touched, assert_view_matches, claim_input_strategy,
    claim_values_strategy, mock_service, ClaimInputBuilder,
};
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_first_upsert_stores_distinct_values(input in claim_input_strategy()) {
        runtime().block_on(async {
            let (store, service) = mock_service(Vec::new()).await;

            let view = service.upsert(input.clone()).await.unwrap();

            let expected = distinct_in_order(input.claim_values.iter().cloned());
            assert_view_matches(&view, &input, &expected);
            assert!(view.updated_at.is_none());
            assert_eq!(store.len().await, 1);
        });
    }

    #[test]
    fn test_second_upsert_merges_into_same_slot(
        first in claim_input_strategy(),
        extra in claim_values_strategy(),
    ) {
        runtime().block_on(async {
            let (store, service) = mock_service(Vec::new()).await;
            let created = service.upsert(first.clone()).await.unwrap();

            let second = ClaimInputBuilder::new()
                .with_user(first.user_id)
                .with_type(first.claim_type)
                .with_values(extra.clone())
                .build();
            let merged = service.upsert(second.clone()).await.unwrap();

            let expected = distinct_in_order(first.claim_values.iter().chain(extra.iter()).cloned());
            assert_eq!(merged.id, created.id);
            assert_eq!(merged.created_at, created.created_at);
            assert_view_matches(&merged, &second, &expected);
            assert_distinct(&merged.claim_values);
            assert_touched(&merged);
            assert_eq!(store.len().await, 1);
        });
    }
}
