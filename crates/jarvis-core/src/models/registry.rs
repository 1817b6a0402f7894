use serde_json::Value;
use std::collections::HashMap;

use crate::models::EngineState;

/// One entry from the `ai_models_status` registry, keyed by model id.
#[derive(Debug, Clone, PartialEq)]
pub struct AiModel {
    pub name: String,
    pub status: EngineState,
    pub available: bool,
}

impl AiModel {
    pub fn from_value(id: &str, data: &Value) -> Self {
        let name = data
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(id)
            .to_string();

        let status = data
            .get("status")
            .and_then(|v| v.as_str())
            .map(EngineState::from_wire)
            .unwrap_or(EngineState::Unknown);

        let available = data
            .get("available")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Self {
            name,
            status,
            available,
        }
    }

    /// Parse the `models` object of an `ai_models_status` payload.
    pub fn map_from_value(data: &Value) -> HashMap<String, AiModel> {
        data.as_object()
            .map(|map| {
                map.iter()
                    .map(|(id, entry)| (id.clone(), AiModel::from_value(id, entry)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_registry_map() {
        let models = AiModel::map_from_value(&json!({
            "gpt-5": {"name": "GPT-5", "status": "active", "available": true},
            "demo-model": {"name": "Demo AI Model", "status": "demo", "available": true},
        }));
        assert_eq!(models.len(), 2);
        assert_eq!(models["gpt-5"].name, "GPT-5");
        assert_eq!(models["demo-model"].status, EngineState::Demo);
    }

    #[test]
    fn falls_back_to_id_for_missing_name() {
        let model = AiModel::from_value("claude-3-5-sonnet", &json!({}));
        assert_eq!(model.name, "claude-3-5-sonnet");
        assert_eq!(model.status, EngineState::Unknown);
        assert!(!model.available);
    }
}
