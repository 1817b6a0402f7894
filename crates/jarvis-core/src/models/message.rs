use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::constants::EMPTY_RESPONSE_PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One entry in the conversation log. Immutable once appended;
/// the log is only ever bulk-cleared, never edited in place.
#[derive(Debug, Clone)]
pub struct Message {
    /// Timestamp-derived, strictly increasing within a session
    pub id: i64,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Backend confidence for assistant replies, 0.0..=1.0
    pub confidence: Option<f64>,
    /// Engines the backend reports having consulted for this reply
    pub engines_used: Vec<String>,
    pub processing_time_secs: Option<f64>,
}

impl Message {
    pub fn new(id: i64, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            created_at: Utc::now(),
            confidence: None,
            engines_used: Vec::new(),
            processing_time_secs: None,
        }
    }
}

/// Parsed `chat_response` payload. Missing fields are tolerated:
/// an empty body falls back to a placeholder, the metadata fields
/// stay absent.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub response: String,
    pub confidence: Option<f64>,
    pub engines_used: Vec<String>,
    pub processing_time_secs: Option<f64>,
}

impl ChatResponse {
    pub fn from_value(data: &Value) -> Self {
        let response = data
            .get("response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(EMPTY_RESPONSE_PLACEHOLDER)
            .to_string();

        let confidence = data.get("confidence").and_then(|v| v.as_f64());

        let engines_used = data
            .get("engines_used")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let processing_time_secs = data.get("processing_time").and_then(|v| v.as_f64());

        Self {
            response,
            confidence,
            engines_used,
            processing_time_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_response_parses_full_payload() {
        let data = json!({
            "response": "hi",
            "confidence": 0.95,
            "engines_used": ["supreme_reasoning", "supreme_knowledge"],
            "processing_time": 1.25,
        });
        let parsed = ChatResponse::from_value(&data);
        assert_eq!(parsed.response, "hi");
        assert_eq!(parsed.confidence, Some(0.95));
        assert_eq!(parsed.engines_used.len(), 2);
        assert_eq!(parsed.processing_time_secs, Some(1.25));
    }

    #[test]
    fn chat_response_defaults_missing_fields() {
        let parsed = ChatResponse::from_value(&json!({}));
        assert_eq!(parsed.response, EMPTY_RESPONSE_PLACEHOLDER);
        assert!(parsed.confidence.is_none());
        assert!(parsed.engines_used.is_empty());
        assert!(parsed.processing_time_secs.is_none());
    }

    #[test]
    fn chat_response_treats_empty_body_as_missing() {
        let parsed = ChatResponse::from_value(&json!({"response": ""}));
        assert_eq!(parsed.response, EMPTY_RESPONSE_PLACEHOLDER);
    }
}
