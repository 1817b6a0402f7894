use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::constants::events;
use crate::http::{HealthReport, PerformanceReport};
use crate::models::{AiModel, ChatResponse, EngineStatus, SettingValue, SystemStatusUpdate};
use crate::models::settings::settings_from_value;

/// Wire frame for the backend event channel: every socket message is a
/// JSON object carrying an event name and a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// An inbound occurrence the runtime dispatches to the store owning
/// that concern. Connection lifecycle transitions are delivered on the
/// same channel so stores observe them in wire order.
#[derive(Debug)]
pub enum ServerEvent {
    // Connection lifecycle
    Connected,
    Disconnected,
    ConnectionError(String),

    // Conversation
    ChatResponse(ChatResponse),
    ProcessingStatus(Vec<String>),
    BackendError(String),

    // System status
    SystemStatus(SystemStatusUpdate),
    EngineActivity(Vec<EngineStatus>),

    // Control settings
    ControlSettings(HashMap<String, SettingValue>),
    ControlSettingsUpdated(bool),

    // Model registry
    AiModels(HashMap<String, AiModel>),

    // Auxiliary REST polls
    HealthReport(HealthReport),
    PerformanceReport(PerformanceReport),
    FetchFailed(String),
}

impl ServerEvent {
    /// Parse an inbound envelope into its event. Unknown event names
    /// and log-only acknowledgments return `None`.
    pub fn from_envelope(envelope: &Envelope) -> Option<Self> {
        let data = &envelope.data;
        match envelope.event.as_str() {
            events::CHAT_RESPONSE => Some(Self::ChatResponse(ChatResponse::from_value(data))),
            events::PROCESSING_STATUS => {
                let engines = data
                    .get("engines_active")
                    .and_then(|v| v.as_array())
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|v| v.as_str().map(|s| s.to_string()))
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Self::ProcessingStatus(engines))
            }
            events::ERROR => {
                let message = data
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown backend error")
                    .to_string();
                Some(Self::BackendError(message))
            }
            events::SYSTEM_STATUS => Some(Self::SystemStatus(SystemStatusUpdate::from_value(data))),
            events::ENGINE_ACTIVITY => {
                let engines = data
                    .get("engines")
                    .map(EngineStatus::list_from_value)
                    .unwrap_or_default();
                Some(Self::EngineActivity(engines))
            }
            events::CONTROL_SETTINGS => {
                let settings = data
                    .get("settings")
                    .map(settings_from_value)
                    .unwrap_or_default();
                Some(Self::ControlSettings(settings))
            }
            events::CONTROL_SETTINGS_UPDATED => {
                let success = data
                    .get("success")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                Some(Self::ControlSettingsUpdated(success))
            }
            events::AI_MODELS_STATUS => {
                let models = data
                    .get("models")
                    .map(AiModel::map_from_value)
                    .unwrap_or_default();
                Some(Self::AiModels(models))
            }
            events::CONNECTION_STATUS | events::PONG => {
                debug!(event = %envelope.event, "backend acknowledgment");
                None
            }
            other => {
                debug!(event = %other, "dropping unknown backend event");
                None
            }
        }
    }
}
