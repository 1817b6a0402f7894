use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::UserProfile;
use crate::constants::{events, WELCOME_MESSAGE};
use crate::models::{ChatResponse, Message, Role};
use crate::socket::SocketHandle;

/// Single source of truth for the conversational exchange: the ordered
/// message log, the single-flight processing flag, and the engines the
/// backend reports as currently working.
pub struct ConversationStore {
    /// Append-only within a session; insertion order is display order
    pub messages: Vec<Message>,
    /// True iff a chat request is outstanding; resolved only by a
    /// response, an error event, or a not-connected rejection at submit
    pub is_processing: bool,
    /// Engines from the latest `processing_status` push, display-only
    pub active_engines: Vec<String>,
    pub draft_input: String,
    profile: UserProfile,
    last_id: i64,
}

impl ConversationStore {
    pub fn new(profile: UserProfile) -> Self {
        let mut store = Self {
            messages: Vec::new(),
            is_processing: false,
            active_engines: Vec::new(),
            draft_input: String::new(),
            profile,
            last_id: 0,
        };
        store.seed_welcome();
        store
    }

    fn seed_welcome(&mut self) {
        let id = self.next_id();
        self.messages.push(Message::new(id, Role::System, WELCOME_MESSAGE));
    }

    /// Timestamp-derived, strictly increasing even when two messages
    /// land in the same millisecond.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    /// Submit a conversational turn. Blank input and a still-pending
    /// request are both silent no-ops (single-flight). An accepted
    /// submit echoes the user message immediately; if the connection is
    /// down the failure is surfaced inline as a system message and
    /// nothing is sent.
    pub fn submit(&mut self, handle: &SocketHandle, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.is_processing {
            debug!("submit ignored: a request is already in flight");
            return;
        }

        let id = self.next_id();
        self.messages.push(Message::new(id, Role::User, text));
        self.is_processing = true;
        self.draft_input.clear();

        let payload = json!({
            "message": text,
            "user_profile": &self.profile,
        });
        if let Err(e) = handle.send(events::CHAT_MESSAGE, payload) {
            warn!("chat submit failed: {e}");
            let id = self.next_id();
            self.messages.push(Message::new(
                id,
                Role::System,
                format!("Could not send your message: {e}. Check the connection and try again."),
            ));
            self.is_processing = false;
        }
    }

    /// Resolve the in-flight request with the backend's reply.
    pub fn handle_chat_response(&mut self, response: ChatResponse) {
        let id = self.next_id();
        let mut message = Message::new(id, Role::Assistant, response.response);
        message.confidence = response.confidence;
        message.engines_used = response.engines_used;
        message.processing_time_secs = response.processing_time_secs;
        self.messages.push(message);

        self.is_processing = false;
        self.active_engines.clear();
    }

    /// Informational only: replaces the active-engine display without
    /// touching the processing flag.
    pub fn handle_processing_status(&mut self, engines: Vec<String>) {
        self.active_engines = engines;
    }

    /// Resolve the in-flight request as a failure. Error events outside
    /// a request cycle are logged and dropped.
    pub fn handle_error(&mut self, message: &str) {
        if !self.is_processing {
            warn!("backend error outside a request cycle: {message}");
            return;
        }
        let id = self.next_id();
        self.messages.push(Message::new(
            id,
            Role::System,
            format!("The assistant hit a problem: {message}"),
        ));
        self.is_processing = false;
        self.active_engines.clear();
    }

    /// Reset the log to the single seed message. Connection state and
    /// any in-flight request are untouched.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.seed_welcome();
    }
}
