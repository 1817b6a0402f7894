use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A control setting value. The backend map mixes feature toggles
/// (bools) with sliders (floats like `responseSpeed`), so both shapes
/// deserialize from the same untagged representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) => None,
        }
    }
}

/// Parse a settings map, dropping entries that are neither bool nor
/// numeric (the backend only ever sends those two shapes).
pub fn settings_from_value(data: &Value) -> HashMap<String, SettingValue> {
    let Some(map) = data.as_object() else {
        return HashMap::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let parsed = match value {
                Value::Bool(b) => SettingValue::Bool(*b),
                Value::Number(n) => SettingValue::Number(n.as_f64()?),
                _ => return None,
            };
            Some((key.clone(), parsed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mixed_map() {
        let settings = settings_from_value(&json!({
            "voiceControl": true,
            "privacyMode": false,
            "responseSpeed": 0.7,
        }));
        assert_eq!(settings.len(), 3);
        assert_eq!(settings["voiceControl"], SettingValue::Bool(true));
        assert_eq!(settings["responseSpeed"], SettingValue::Number(0.7));
    }

    #[test]
    fn drops_non_scalar_entries() {
        let settings = settings_from_value(&json!({
            "ok": true,
            "weird": {"nested": 1},
            "also_weird": "text",
        }));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn round_trips_through_serde() {
        let value = serde_json::to_value(SettingValue::Number(0.5)).unwrap();
        assert_eq!(value, json!(0.5));
        let back: SettingValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(back, SettingValue::Bool(true));
    }
}
