//! Application-wide constants
//!
//! Centralized location for event names and configuration values
//! that are used across multiple modules.

use std::time::Duration;

/// Default backend socket endpoint (local dev backend)
pub const SOCKET_URL: &str = "ws://127.0.0.1:5001/socket";

/// Default backend HTTP base for the auxiliary read endpoints
pub const HTTP_BASE_URL: &str = "http://127.0.0.1:5001";

/// Seed message shown at the top of every conversation
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your Jarvis assistant. Ask me anything, or check the engine panel for system status.";

/// Placeholder content when a chat response arrives without a body
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "(no response)";

/// How often the poller re-requests full system status
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How often the poller refreshes the auxiliary health/performance reads
pub const METRICS_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Fallback uptime text when the backend omits the field
pub const DEFAULT_UPTIME: &str = "0m";

// Socket event names shared with the backend
pub mod events {
    // Outbound (client -> backend)
    /// Submit a conversational turn
    pub const CHAT_MESSAGE: &str = "chat_message";
    /// Poll for full system status
    pub const REQUEST_SYSTEM_STATUS: &str = "request_system_status";
    /// Fetch the control settings map
    pub const GET_CONTROL_SETTINGS: &str = "get_control_settings";
    /// Persist the full control settings map
    pub const UPDATE_CONTROL_SETTINGS: &str = "update_control_settings";
    /// Fetch the available-model registry
    pub const GET_AI_MODELS: &str = "get_ai_models";
    /// Connection liveness probe
    pub const PING: &str = "ping";

    // Inbound (backend -> client)
    /// Resolves the in-flight chat request
    pub const CHAT_RESPONSE: &str = "chat_response";
    /// Updates the active-engine display while a request runs
    pub const PROCESSING_STATUS: &str = "processing_status";
    /// Resolves the in-flight chat request as a failure
    pub const ERROR: &str = "error";
    /// Full status replacement (engines + aggregates)
    pub const SYSTEM_STATUS: &str = "system_status";
    /// Engine-only status replacement
    pub const ENGINE_ACTIVITY: &str = "engine_activity";
    /// Settings map replacement
    pub const CONTROL_SETTINGS: &str = "control_settings";
    /// Settings save acknowledgment (logged only)
    pub const CONTROL_SETTINGS_UPDATED: &str = "control_settings_updated";
    /// Model registry replacement
    pub const AI_MODELS_STATUS: &str = "ai_models_status";
    /// Greeting emitted by the backend on connect (logged only)
    pub const CONNECTION_STATUS: &str = "connection_status";
    /// Liveness probe reply (logged only)
    pub const PONG: &str = "pong";
}
