use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use serde_json::json;
use tracing::{info, warn};

use crate::config::CoreConfig;
use crate::constants::events;
use crate::events::ServerEvent;
use crate::poller::{PollRequest, StatusPoller};
use crate::socket::{SocketCommand, SocketConnection, SocketHandle};
use crate::store::{ConversationStore, ControlSettingsStore, ModelRegistryStore, SystemStatusStore};

/// Application-state container constructed once at startup and passed
/// by reference to whatever renders it - no ambient globals. Owns the
/// stores, the single socket connection, and the poller; `tick()` is
/// the only place store mutations happen, so handlers never interleave.
pub struct ClientRuntime {
    pub conversation: ConversationStore,
    pub system_status: SystemStatusStore,
    pub settings: ControlSettingsStore,
    pub models: ModelRegistryStore,
    connection: SocketConnection,
    poller: StatusPoller,
    event_rx: Receiver<ServerEvent>,
}

impl ClientRuntime {
    pub fn new(config: CoreConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let connection = SocketConnection::spawn(&config, event_tx);
        Self {
            conversation: ConversationStore::new(config.user_profile.clone()),
            system_status: SystemStatusStore::new(),
            settings: ControlSettingsStore::new(),
            models: ModelRegistryStore::new(),
            connection,
            poller: StatusPoller::new(config.status_poll_interval, config.metrics_poll_interval),
            event_rx,
        }
    }

    /// Only the runtime owner drives the connection lifecycle; stores
    /// get [`SocketHandle`] clones and can merely send.
    pub fn connect(&self) {
        self.connection.connect();
    }

    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    pub fn handle(&self) -> SocketHandle {
        self.connection.handle()
    }

    /// Drain pending events in delivery order, then let the poller run.
    /// Called from the owner's event loop; each invocation is a short
    /// synchronous burst of store mutations.
    pub fn tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.dispatch(event);
        }
        self.poll(Instant::now());
    }

    fn dispatch(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Connected => {
                info!("backend connected");
                self.initial_sync();
            }
            ServerEvent::Disconnected => info!("backend disconnected"),
            ServerEvent::ConnectionError(message) => warn!("connection error: {message}"),

            ServerEvent::ChatResponse(response) => {
                self.conversation.handle_chat_response(response)
            }
            ServerEvent::ProcessingStatus(engines) => {
                self.conversation.handle_processing_status(engines)
            }
            ServerEvent::BackendError(message) => self.conversation.handle_error(&message),

            ServerEvent::SystemStatus(update) => self.system_status.apply_full_status(update),
            ServerEvent::EngineActivity(engines) => {
                self.system_status.apply_engine_activity(engines)
            }

            ServerEvent::ControlSettings(settings) => self.settings.handle_settings(settings),
            ServerEvent::ControlSettingsUpdated(success) => self.settings.handle_save_ack(success),

            ServerEvent::AiModels(models) => self.models.handle_models(models),

            ServerEvent::HealthReport(report) => self.system_status.set_health(report),
            ServerEvent::PerformanceReport(report) => self.system_status.set_performance(report),
            ServerEvent::FetchFailed(message) => self.system_status.set_fetch_error(message),
        }
    }

    /// What the frontend does the moment the channel opens: pull the
    /// full status, the settings map, and the model registry.
    fn initial_sync(&self) {
        let handle = self.connection.handle();
        if handle.send(events::REQUEST_SYSTEM_STATUS, json!({})).is_err() {
            // Connection dropped between the event and the sync; the
            // poller will catch up after the next connect
            return;
        }
        self.settings.request(&handle);
        let _ = handle.send(events::GET_AI_MODELS, json!({}));
    }

    fn poll(&mut self, now: Instant) {
        let handle = self.connection.handle();
        for request in self.poller.due(now, handle.is_connected()) {
            match request {
                PollRequest::SystemStatus => {
                    let _ = handle.send(events::REQUEST_SYSTEM_STATUS, json!({}));
                }
                PollRequest::Metrics => {
                    let _ = handle.command(SocketCommand::FetchHealth);
                    let _ = handle.command(SocketCommand::FetchPerformance);
                }
            }
        }
    }

    /// Stop the socket worker and wait for it; called on unmount.
    pub fn shutdown(&mut self) {
        self.connection.shutdown();
    }
}
