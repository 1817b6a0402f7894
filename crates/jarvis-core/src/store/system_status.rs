use tracing::debug;

use crate::constants::DEFAULT_UPTIME;
use crate::http::{HealthReport, PerformanceReport};
use crate::models::{EngineStatus, OverallHealth, SystemStatusUpdate};

/// Last-known view of remote engine health, reconciled from two
/// independent sources: unsolicited pushes and the status poller.
/// Incoming collections replace the local ones wholesale - there is no
/// partial-entry merge, so differently-shaped payloads cannot leave
/// stale fields behind.
pub struct SystemStatusStore {
    /// Unique by name; order follows the latest payload
    pub engines: Vec<EngineStatus>,
    pub overall_health: OverallHealth,
    pub godlike_mode: bool,
    pub active_sessions: u64,
    pub uptime: String,

    /// Latest auxiliary REST reads; retained across failed fetches
    pub health: Option<HealthReport>,
    pub performance: Option<PerformanceReport>,
    /// Set on a failed fetch, cleared by the next success
    pub fetch_error: Option<String>,
}

impl SystemStatusStore {
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
            overall_health: OverallHealth::Unknown,
            godlike_mode: false,
            active_sessions: 0,
            uptime: DEFAULT_UPTIME.to_string(),
            health: None,
            performance: None,
            fetch_error: None,
        }
    }

    /// Handler for both poll responses and full-status pushes: the
    /// engine set and every aggregate field are overwritten.
    pub fn apply_full_status(&mut self, update: SystemStatusUpdate) {
        self.engines = dedup_by_name(update.engines);
        self.overall_health = update.overall_health;
        self.godlike_mode = update.godlike_mode;
        self.active_sessions = update.active_sessions;
        self.uptime = update.uptime;
    }

    /// Higher-frequency engine-only replacement; aggregates untouched.
    pub fn apply_engine_activity(&mut self, engines: Vec<EngineStatus>) {
        self.engines = dedup_by_name(engines);
    }

    pub fn engine(&self, name: &str) -> Option<&EngineStatus> {
        self.engines.iter().find(|e| e.name == name)
    }

    pub fn set_health(&mut self, report: HealthReport) {
        self.health = Some(report);
        self.fetch_error = None;
    }

    pub fn set_performance(&mut self, report: PerformanceReport) {
        self.performance = Some(report);
        self.fetch_error = None;
    }

    /// A failed poll keeps whatever data we already had.
    pub fn set_fetch_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("status fetch failed: {message}");
        self.fetch_error = Some(message);
    }
}

impl Default for SystemStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the last occurrence of each name, preserving payload order of
/// the survivors. The backend should never duplicate names, but a
/// replacement list must not be able to introduce duplicates locally.
fn dedup_by_name(engines: Vec<EngineStatus>) -> Vec<EngineStatus> {
    let mut deduped: Vec<EngineStatus> = Vec::with_capacity(engines.len());
    for engine in engines {
        if let Some(existing) = deduped.iter_mut().find(|e| e.name == engine.name) {
            *existing = engine;
        } else {
            deduped.push(engine);
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngineState;
    use serde_json::json;

    fn full_status() -> SystemStatusUpdate {
        SystemStatusUpdate::from_value(&json!({
            "engines": [
                {"name": "Supreme Reasoning", "status": "active", "activity": 95},
                {"name": "Supreme Security", "status": "idle", "activity": 10},
            ],
            "overall_health": "excellent",
            "godlike_mode": true,
            "active_sessions": 2,
            "uptime": "3h",
        }))
    }

    fn activity(name: &str, activity: u8) -> EngineStatus {
        EngineStatus::from_value(&json!({"name": name, "status": "active", "activity": activity}))
            .unwrap()
    }

    #[test]
    fn full_status_replaces_everything() {
        let mut store = SystemStatusStore::new();
        store.apply_full_status(full_status());

        assert_eq!(store.engines.len(), 2);
        assert_eq!(store.overall_health, OverallHealth::Excellent);
        assert!(store.godlike_mode);
        assert_eq!(store.active_sessions, 2);
        assert_eq!(store.uptime, "3h");
    }

    #[test]
    fn full_status_is_idempotent() {
        let mut store = SystemStatusStore::new();
        store.apply_full_status(full_status());
        let engines_first = store.engines.clone();

        store.apply_full_status(full_status());

        assert_eq!(store.engines, engines_first);
        assert_eq!(store.engines.len(), 2, "no duplicate entries on re-apply");
    }

    #[test]
    fn sparse_full_status_falls_back_to_safe_defaults() {
        let mut store = SystemStatusStore::new();
        store.apply_full_status(full_status());

        store.apply_full_status(SystemStatusUpdate::from_value(&json!({})));

        assert!(store.engines.is_empty());
        assert_eq!(store.overall_health, OverallHealth::Unknown);
        assert!(!store.godlike_mode);
        assert_eq!(store.active_sessions, 0);
        assert_eq!(store.uptime, DEFAULT_UPTIME);
    }

    #[test]
    fn engine_activity_leaves_aggregates_alone() {
        let mut store = SystemStatusStore::new();
        store.apply_full_status(full_status());

        store.apply_engine_activity(vec![activity("Supreme Reasoning", 42)]);

        assert_eq!(store.engines.len(), 1);
        assert_eq!(store.engine("Supreme Reasoning").unwrap().activity, 42);
        assert_eq!(store.overall_health, OverallHealth::Excellent);
        assert!(store.godlike_mode);
        assert_eq!(store.uptime, "3h");
    }

    #[test]
    fn repeated_activity_keeps_only_the_latest_value() {
        let mut store = SystemStatusStore::new();
        store.apply_engine_activity(vec![activity("Reasoning", 80)]);
        store.apply_engine_activity(vec![activity("Reasoning", 60)]);

        assert_eq!(store.engines.len(), 1);
        let engine = store.engine("Reasoning").unwrap();
        assert_eq!(engine.activity, 60);
        assert_eq!(engine.status, EngineState::Active);
    }

    #[test]
    fn duplicate_names_within_one_payload_collapse_to_the_last() {
        let mut store = SystemStatusStore::new();
        store.apply_engine_activity(vec![activity("A", 10), activity("A", 90)]);

        assert_eq!(store.engines.len(), 1);
        assert_eq!(store.engines[0].activity, 90);
    }

    #[test]
    fn failed_fetch_retains_prior_data() {
        let mut store = SystemStatusStore::new();
        store.set_health(HealthReport {
            status: "healthy".to_string(),
            supreme_mode: true,
            modules_loaded: 5,
            version: "1.0.0".to_string(),
        });

        store.set_fetch_error("connection refused");

        assert!(store.health.is_some(), "stale data is retained");
        assert_eq!(store.fetch_error.as_deref(), Some("connection refused"));

        store.set_health(HealthReport {
            status: "healthy".to_string(),
            supreme_mode: true,
            modules_loaded: 5,
            version: "1.0.1".to_string(),
        });
        assert!(store.fetch_error.is_none(), "success clears the flag");
    }
}
