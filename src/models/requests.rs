//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed tag length in bytes
pub const MAX_TAG_LENGTH: usize = 256;

fn validate_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return Some("Tags cannot be empty".to_string());
    }
    if tags.iter().any(|tag| tag.len() > MAX_TAG_LENGTH) {
        return Some(format!(
            "Tag exceeds maximum length of {} characters",
            MAX_TAG_LENGTH
        ));
    }
    None
}

/// Request body for the SET operation (PUT /entries)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// Tags the value is stored under
    pub tags: Vec<String>,
    /// The value to store
    pub value: Value,
    /// Optional TTL in milliseconds (uses default if absent or 0)
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_tags(&self.tags)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms.map(Duration::from_millis)
    }
}

/// Request body naming a tag set (lookup, check, delete, invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct TagsRequest {
    pub tags: Vec<String>,
}

impl TagsRequest {
    pub fn validate(&self) -> Option<String> {
        validate_tags(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let body = r#"{"tags": ["a", "b"], "value": {"foo": "bar"}}"#;
        let req: SetRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.tags, vec!["a", "b"]);
        assert_eq!(req.value, json!({"foo": "bar"}));
        assert!(req.ttl().is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let body = r#"{"tags": ["a"], "value": 1, "ttl_ms": 100}"#;
        let req: SetRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.ttl(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_validate_empty_tags() {
        let req = TagsRequest { tags: vec![] };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_tag() {
        let req = TagsRequest {
            tags: vec!["x".repeat(MAX_TAG_LENGTH + 1)],
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            tags: vec!["valid".to_string()],
            value: json!("test"),
            ttl_ms: Some(60),
        };
        assert!(req.validate().is_none());
    }
}
