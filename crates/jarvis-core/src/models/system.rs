use serde_json::Value;

use crate::constants::DEFAULT_UPTIME;
use crate::models::EngineStatus;

/// Aggregate backend health as reported in `system_status` payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverallHealth {
    #[default]
    Unknown,
    Good,
    Excellent,
    Warning,
    Demo,
    Error,
}

impl OverallHealth {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "good" => Self::Good,
            "excellent" => Self::Excellent,
            "warning" => Self::Warning,
            "demo" => Self::Demo,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Warning => "warning",
            Self::Demo => "demo",
            Self::Error => "error",
        }
    }
}

/// Parsed `system_status` payload. Every field has a safe fallback so
/// a sparse payload still applies cleanly as a full replacement.
#[derive(Debug, Clone)]
pub struct SystemStatusUpdate {
    pub engines: Vec<EngineStatus>,
    pub overall_health: OverallHealth,
    pub godlike_mode: bool,
    pub active_sessions: u64,
    /// Backend-formatted duration text (the original backend sends "∞")
    pub uptime: String,
}

impl SystemStatusUpdate {
    pub fn from_value(data: &Value) -> Self {
        let engines = data
            .get("engines")
            .map(EngineStatus::list_from_value)
            .unwrap_or_default();

        let overall_health = data
            .get("overall_health")
            .and_then(|v| v.as_str())
            .map(OverallHealth::from_wire)
            .unwrap_or_default();

        let godlike_mode = data
            .get("godlike_mode")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let active_sessions = data
            .get("active_sessions")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let uptime = data
            .get("uptime")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_UPTIME)
            .to_string();

        Self {
            engines,
            overall_health,
            godlike_mode,
            active_sessions,
            uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_payload() {
        let update = SystemStatusUpdate::from_value(&json!({
            "engines": [
                {"name": "Supreme Reasoning", "status": "active", "activity": 95},
                {"name": "Supreme Security", "status": "idle", "activity": 10},
            ],
            "overall_health": "excellent",
            "godlike_mode": true,
            "active_sessions": 3,
            "uptime": "∞",
        }));
        assert_eq!(update.engines.len(), 2);
        assert_eq!(update.overall_health, OverallHealth::Excellent);
        assert!(update.godlike_mode);
        assert_eq!(update.active_sessions, 3);
        assert_eq!(update.uptime, "∞");
    }

    #[test]
    fn empty_payload_falls_back_to_defaults() {
        let update = SystemStatusUpdate::from_value(&json!({}));
        assert!(update.engines.is_empty());
        assert_eq!(update.overall_health, OverallHealth::Unknown);
        assert!(!update.godlike_mode);
        assert_eq!(update.active_sessions, 0);
        assert_eq!(update.uptime, DEFAULT_UPTIME);
    }

    #[test]
    fn health_strings_map_exhaustively() {
        for (wire, health) in [
            ("good", OverallHealth::Good),
            ("excellent", OverallHealth::Excellent),
            ("warning", OverallHealth::Warning),
            ("demo", OverallHealth::Demo),
            ("error", OverallHealth::Error),
            ("supreme", OverallHealth::Unknown),
        ] {
            assert_eq!(OverallHealth::from_wire(wire), health);
        }
    }
}
