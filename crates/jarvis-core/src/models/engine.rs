use serde_json::Value;

/// Reported state of a remote engine.
///
/// `Unknown` is the required catch-all: wire strings outside the known
/// set land here instead of being compared against ad-hoc fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Active,
    Idle,
    Error,
    Demo,
    Unknown,
}

impl EngineState {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "idle" => Self::Idle,
            "error" => Self::Error,
            "demo" => Self::Demo,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Error => "error",
            Self::Demo => "demo",
            Self::Unknown => "unknown",
        }
    }
}

/// One engine entry from a `system_status` or `engine_activity` payload.
/// Identity is `name`; lists on the wire replace the local set wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    pub name: String,
    /// `engine_activity` pushes omit this field; it parses as Unknown
    pub status: EngineState,
    /// Activity level 0..=100
    pub activity: u8,
    /// Backend-formatted timestamp, kept opaque
    pub last_used: Option<String>,
}

impl EngineStatus {
    /// Parse a single engine entry. Entries without a `name` are dropped.
    pub fn from_value(data: &Value) -> Option<Self> {
        let name = data.get("name")?.as_str()?.to_string();

        let status = data
            .get("status")
            .and_then(|v| v.as_str())
            .map(EngineState::from_wire)
            .unwrap_or(EngineState::Unknown);

        let activity = data
            .get("activity")
            .and_then(|v| v.as_u64())
            .map(|a| a.min(100) as u8)
            .unwrap_or(0);

        let last_used = data
            .get("last_used")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Some(Self {
            name,
            status,
            activity,
            last_used,
        })
    }

    /// Parse an engine list, dropping malformed entries.
    pub fn list_from_value(data: &Value) -> Vec<Self> {
        data.as_array()
            .map(|arr| arr.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_entry() {
        let engine = EngineStatus::from_value(&json!({
            "name": "Supreme Reasoning",
            "status": "active",
            "activity": 95,
            "last_used": "2026-08-30T12:00:00",
        }))
        .unwrap();
        assert_eq!(engine.name, "Supreme Reasoning");
        assert_eq!(engine.status, EngineState::Active);
        assert_eq!(engine.activity, 95);
        assert!(engine.last_used.is_some());
    }

    #[test]
    fn activity_push_without_status_is_unknown() {
        let engine =
            EngineStatus::from_value(&json!({"name": "Supreme Knowledge", "activity": 98}))
                .unwrap();
        assert_eq!(engine.status, EngineState::Unknown);
        assert_eq!(engine.activity, 98);
    }

    #[test]
    fn unrecognized_status_string_maps_to_unknown() {
        let engine =
            EngineStatus::from_value(&json!({"name": "X", "status": "transcendent"})).unwrap();
        assert_eq!(engine.status, EngineState::Unknown);
    }

    #[test]
    fn nameless_entries_are_dropped() {
        assert!(EngineStatus::from_value(&json!({"activity": 50})).is_none());
        let list = EngineStatus::list_from_value(&json!([
            {"name": "A", "activity": 1},
            {"activity": 2},
        ]));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn out_of_range_activity_is_clamped() {
        let engine = EngineStatus::from_value(&json!({"name": "A", "activity": 900})).unwrap();
        assert_eq!(engine.activity, 100);
    }
}
