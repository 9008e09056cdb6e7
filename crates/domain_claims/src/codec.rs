//! Claim value blob encoding
//!
//! A claim's values are persisted as a single JSON array string. The codec is
//! lossless: it keeps order and duplicates. Deduplication is a service
//! decision and never happens here.

use crate::error::ClaimError;

/// Encodes an ordered list of values into the stored blob
pub fn encode_claim_values(values: &[String]) -> Result<String, ClaimError> {
    Ok(serde_json::to_string(values)?)
}

/// Decodes a stored blob back into the ordered list of values
pub fn decode_claim_value(blob: &str) -> Result<Vec<String>, ClaimError> {
    Ok(serde_json::from_str(blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        let input = values(&["a", "a", "b"]);
        let blob = encode_claim_values(&input).unwrap();
        assert_eq!(blob, r#"["a","a","b"]"#);
        assert_eq!(decode_claim_value(&blob).unwrap(), input);
    }

    #[test]
    fn test_empty_list() {
        let blob = encode_claim_values(&[]).unwrap();
        assert_eq!(blob, "[]");
        assert!(decode_claim_value(&blob).unwrap().is_empty());
    }

    #[test]
    fn test_escapes_special_characters() {
        let input = values(&["topic/\"quoted\"", "line\nbreak", "ümlaut/#"]);
        let blob = encode_claim_values(&input).unwrap();
        assert_eq!(decode_claim_value(&blob).unwrap(), input);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(decode_claim_value("{\"a\":1}").is_err());
        assert!(decode_claim_value("").is_err());
        assert!(decode_claim_value("[1,2]").is_err());
    }
}
