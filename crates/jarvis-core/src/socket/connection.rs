use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::mpsc::{self as tokio_mpsc, UnboundedSender};
use tracing::{debug, warn};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::events::{Envelope, ServerEvent};
use crate::socket::worker::SocketWorker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Lifecycle state of the single backend connection. Mutated only by
/// the lifecycle paths (owner's `connect()` and the worker's open/
/// close/error transitions); everyone else reads.
#[derive(Debug, Default)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub last_error: Option<String>,
}

impl ConnectionState {
    pub fn mark_connecting(&mut self) {
        self.status = ConnectionStatus::Connecting;
    }

    pub fn mark_connected(&mut self) {
        self.status = ConnectionStatus::Connected;
        self.last_error = None;
    }

    pub fn mark_disconnected(&mut self) {
        self.status = ConnectionStatus::Disconnected;
    }

    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.status = ConnectionStatus::Error;
        self.last_error = Some(message.into());
    }
}

pub type SharedConnectionState = Arc<RwLock<ConnectionState>>;

/// Commands from the owning thread to the socket worker.
#[derive(Debug)]
pub enum SocketCommand {
    Connect,
    Disconnect,
    Emit(Envelope),
    FetchHealth,
    FetchPerformance,
    Shutdown,
}

/// Cloneable sender side of the connection. Stores hold one of these;
/// only the root-owned [`SocketConnection`] drives the lifecycle.
#[derive(Clone)]
pub struct SocketHandle {
    command_tx: UnboundedSender<SocketCommand>,
    state: SharedConnectionState,
}

impl SocketHandle {
    pub(crate) fn new(
        command_tx: UnboundedSender<SocketCommand>,
        state: SharedConnectionState,
    ) -> Self {
        Self { command_tx, state }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.read().status
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Connected
    }

    /// Emit an event to the backend. Nothing is queued while
    /// disconnected: the caller gets `NotConnected` and is responsible
    /// for its own user-visible notice.
    pub fn send(&self, event: &str, data: Value) -> Result<(), CoreError> {
        if !self.is_connected() {
            return Err(CoreError::NotConnected);
        }
        self.command_tx
            .send(SocketCommand::Emit(Envelope::new(event, data)))
            .map_err(|_| CoreError::WorkerGone)
    }

    /// Liveness probe for diagnostics; the backend answers with `pong`.
    pub fn ping(&self) -> Result<(), CoreError> {
        self.send(crate::constants::events::PING, serde_json::json!({}))
    }

    pub(crate) fn command(&self, command: SocketCommand) -> Result<(), CoreError> {
        self.command_tx
            .send(command)
            .map_err(|_| CoreError::WorkerGone)
    }
}

/// Root-owned supervisor of the single connection instance. One per
/// application session; stores receive [`SocketHandle`] clones and may
/// only send, never connect or disconnect.
pub struct SocketConnection {
    handle: SocketHandle,
    worker_thread: Option<JoinHandle<()>>,
}

impl SocketConnection {
    /// Spawn the I/O worker thread. Parsed inbound events are delivered
    /// on `event_tx` in the order the transport produced them.
    pub fn spawn(config: &CoreConfig, event_tx: Sender<ServerEvent>) -> Self {
        let state: SharedConnectionState = Arc::new(RwLock::new(ConnectionState::default()));
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();

        let worker = SocketWorker::new(
            config.socket_url.clone(),
            config.http_base_url.clone(),
            state.clone(),
            command_rx,
            event_tx,
        );
        let worker_thread = std::thread::spawn(move || worker.run());

        Self {
            handle: SocketHandle::new(command_tx, state),
            worker_thread: Some(worker_thread),
        }
    }

    pub fn handle(&self) -> SocketHandle {
        self.handle.clone()
    }

    /// Open the connection. No-op while already connecting or
    /// connected, so repeated calls cannot stack a second socket or a
    /// second set of handlers.
    pub fn connect(&self) {
        {
            let mut state = self.handle.state.write();
            match state.status {
                ConnectionStatus::Connecting | ConnectionStatus::Connected => {
                    debug!(status = ?state.status, "connect() ignored");
                    return;
                }
                ConnectionStatus::Disconnected | ConnectionStatus::Error => {
                    state.mark_connecting();
                }
            }
        }
        if self.handle.command(SocketCommand::Connect).is_err() {
            warn!("socket worker is gone; connect dropped");
            self.handle.state.write().mark_error("socket worker is gone");
        }
    }

    /// Close the connection. Idempotent: closing an already-closed
    /// connection is a no-op, not an error.
    pub fn disconnect(&self) {
        let _ = self.handle.command(SocketCommand::Disconnect);
    }

    /// Stop the worker thread and wait for it to exit.
    pub fn shutdown(&mut self) {
        let _ = self.handle.command(SocketCommand::Shutdown);
        if let Some(worker_thread) = self.worker_thread.take() {
            let _ = worker_thread.join();
        }
    }

    #[cfg(test)]
    pub(crate) fn test_set_status(&self, status: ConnectionStatus) {
        self.handle.state.write().status = status;
    }

    #[cfg(test)]
    pub(crate) fn detached() -> (Self, tokio_mpsc::UnboundedReceiver<SocketCommand>) {
        let state: SharedConnectionState = Arc::new(RwLock::new(ConnectionState::default()));
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        let connection = Self {
            handle: SocketHandle::new(command_tx, state),
            worker_thread: None,
        };
        (connection, command_rx)
    }
}

#[cfg(test)]
impl SocketHandle {
    /// Handle wired to a bare command channel, for store tests that
    /// need a connection in a known state without a worker behind it.
    pub(crate) fn test_pair(
        status: ConnectionStatus,
    ) -> (Self, tokio_mpsc::UnboundedReceiver<SocketCommand>) {
        let state = Arc::new(RwLock::new(ConnectionState {
            status,
            last_error: None,
        }));
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        (Self::new(command_tx, state), command_rx)
    }
}
