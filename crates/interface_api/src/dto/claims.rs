//! Claims DTOs
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, UserId};
use domain_claims::{ClaimInput, ClaimType, ClaimView};

/// Body of `POST /api/claim` and `PUT /api/claim/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub user_id: UserId,
    pub claim_type: ClaimType,
    #[serde(default)]
    pub claim_values: Vec<String>,
}

impl From<ClaimRequest> for ClaimInput {
    fn from(request: ClaimRequest) -> Self {
        ClaimInput::new(request.user_id, request.claim_type, request.claim_values)
    }
}

impl From<ClaimInput> for ClaimRequest {
    fn from(input: ClaimInput) -> Self {
        Self {
            user_id: input.user_id,
            claim_type: input.claim_type,
            claim_values: input.claim_values,
        }
    }
}

/// A stored claim; `updatedAt` is `null` until the claim is first modified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub user_id: UserId,
    pub claim_type: ClaimType,
    pub claim_values: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ClaimView> for ClaimResponse {
    fn from(view: ClaimView) -> Self {
        Self {
            id: view.id,
            user_id: view.user_id,
            claim_type: view.claim_type,
            claim_values: view.claim_values,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_response_wire_shape() {
        let response = ClaimResponse {
            id: ClaimId::new(1),
            user_id: UserId::new(9),
            claim_type: ClaimType::PublishWhitelist,
            claim_values: vec!["devices/9/#".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            updated_at: None,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "id": 1,
                "userId": 9,
                "claimType": "PublishWhitelist",
                "claimValues": ["devices/9/#"],
                "createdAt": "2024-03-01T08:00:00Z",
                "updatedAt": null
            })
        );
    }

    #[test]
    fn test_request_accepts_camel_case() {
        let request: ClaimRequest = serde_json::from_value(json!({
            "userId": 4,
            "claimType": "SubscriptionBlacklist",
            "claimValues": ["a", "a"]
        }))
        .unwrap();

        let input = ClaimInput::from(request);
        assert_eq!(input.user_id, UserId::new(4));
        assert_eq!(input.claim_type, ClaimType::SubscriptionBlacklist);
        assert_eq!(input.claim_values, vec!["a", "a"]);
    }

    #[test]
    fn test_request_rejects_unknown_claim_type() {
        let result = serde_json::from_value::<ClaimRequest>(json!({
            "userId": 4,
            "claimType": "Admin",
            "claimValues": []
        }));
        assert!(result.is_err());
    }
}
