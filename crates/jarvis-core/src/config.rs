use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{HTTP_BASE_URL, METRICS_POLL_INTERVAL, SOCKET_URL, STATUS_POLL_INTERVAL};

/// Profile sent alongside every chat message so the backend can
/// personalize responses. All fields are client-chosen; the backend
/// treats them as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub preferences: Value,
    #[serde(default)]
    pub context: Value,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            name: "User".to_string(),
            preferences: Value::Null,
            context: Value::Null,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// WebSocket endpoint of the backend event channel
    pub socket_url: String,
    /// Base URL for the auxiliary REST reads (health, performance)
    pub http_base_url: String,
    pub status_poll_interval: Duration,
    pub metrics_poll_interval: Duration,
    pub user_profile: UserProfile,
}

impl CoreConfig {
    pub fn new(socket_url: impl Into<String>, http_base_url: impl Into<String>) -> Self {
        Self {
            socket_url: socket_url.into(),
            http_base_url: http_base_url.into(),
            status_poll_interval: STATUS_POLL_INTERVAL,
            metrics_poll_interval: METRICS_POLL_INTERVAL,
            user_profile: UserProfile::default(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(SOCKET_URL, HTTP_BASE_URL)
    }
}
