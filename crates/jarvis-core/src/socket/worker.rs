use std::sync::mpsc::Sender;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use crate::events::{Envelope, ServerEvent};
use crate::http::{fetch_health, fetch_performance};
use crate::socket::connection::{SharedConnectionState, SocketCommand};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Owns all backend I/O on a dedicated thread: the WebSocket event
/// channel plus the auxiliary REST reads. Commands arrive from the
/// owning thread; parsed events flow back on the event channel in
/// delivery order. The worker never reconnects on its own - a dropped
/// connection stays down until the owner commands a fresh `Connect`.
pub struct SocketWorker {
    socket_url: String,
    http_base_url: String,
    state: SharedConnectionState,
    command_rx: UnboundedReceiver<SocketCommand>,
    event_tx: Sender<ServerEvent>,
}

impl SocketWorker {
    pub fn new(
        socket_url: String,
        http_base_url: String,
        state: SharedConnectionState,
        command_rx: UnboundedReceiver<SocketCommand>,
        event_tx: Sender<ServerEvent>,
    ) -> Self {
        Self {
            socket_url,
            http_base_url,
            state,
            command_rx,
            event_tx,
        }
    }

    pub fn run(mut self) {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("failed to build socket worker runtime: {e}");
                self.state.write().mark_error(format!("worker startup failed: {e}"));
                return;
            }
        };
        runtime.block_on(self.event_loop());
        info!("socket worker stopped");
    }

    async fn event_loop(&mut self) {
        let http = reqwest::Client::new();
        let mut socket: Option<WsStream> = None;

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        Some(SocketCommand::Connect) => {
                            if socket.is_some() {
                                debug!("connect command ignored: socket already open");
                                continue;
                            }
                            socket = self.open_socket().await;
                        }
                        Some(SocketCommand::Disconnect) => {
                            if let Some(mut open) = socket.take() {
                                let _ = open.close(None).await;
                                self.state.write().mark_disconnected();
                                self.forward(ServerEvent::Disconnected);
                            }
                        }
                        Some(SocketCommand::Emit(envelope)) => {
                            socket = self.emit(socket, &envelope).await;
                        }
                        Some(SocketCommand::FetchHealth) => {
                            match fetch_health(&http, &self.http_base_url).await {
                                Ok(report) => self.forward(ServerEvent::HealthReport(report)),
                                Err(e) => self.forward(ServerEvent::FetchFailed(e.to_string())),
                            }
                        }
                        Some(SocketCommand::FetchPerformance) => {
                            match fetch_performance(&http, &self.http_base_url).await {
                                Ok(report) => self.forward(ServerEvent::PerformanceReport(report)),
                                Err(e) => self.forward(ServerEvent::FetchFailed(e.to_string())),
                            }
                        }
                        Some(SocketCommand::Shutdown) | None => {
                            if let Some(mut open) = socket.take() {
                                let _ = open.close(None).await;
                            }
                            self.state.write().mark_disconnected();
                            break;
                        }
                    }
                }
                frame = next_frame(&mut socket), if socket.is_some() => {
                    match frame {
                        Some(Ok(WsMessage::Text(text))) => self.handle_frame(&text),
                        Some(Ok(WsMessage::Close(_))) | None => {
                            socket = None;
                            self.state.write().mark_disconnected();
                            self.forward(ServerEvent::Disconnected);
                        }
                        Some(Ok(_)) => {
                            // Binary/ping/pong frames carry nothing for us
                        }
                        Some(Err(e)) => {
                            socket = None;
                            let message = e.to_string();
                            self.state.write().mark_error(message.clone());
                            self.forward(ServerEvent::ConnectionError(message));
                        }
                    }
                }
            }
        }
    }

    async fn open_socket(&self) -> Option<WsStream> {
        match connect_async(self.socket_url.as_str()).await {
            Ok((stream, _response)) => {
                info!(url = %self.socket_url, "connected to backend");
                self.state.write().mark_connected();
                self.forward(ServerEvent::Connected);
                Some(stream)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(url = %self.socket_url, "connection failed: {message}");
                self.state.write().mark_error(message.clone());
                self.forward(ServerEvent::ConnectionError(message));
                None
            }
        }
    }

    /// Write one envelope. A write failure ends the session: the socket
    /// is dropped rather than left half-open, and the owner must
    /// explicitly reconnect.
    async fn emit(&self, mut socket: Option<WsStream>, envelope: &Envelope) -> Option<WsStream> {
        let Some(open) = socket.as_mut() else {
            // Raced with a close; the caller already checked state, so
            // this is dropped silently at the transport level
            debug!(event = %envelope.event, "dropping emit while disconnected");
            return None;
        };

        let text = match serde_json::to_string(envelope) {
            Ok(text) => text,
            Err(e) => {
                error!(event = %envelope.event, "failed to serialize envelope: {e}");
                return socket;
            }
        };

        if let Err(e) = open.send(WsMessage::Text(text)).await {
            let message = e.to_string();
            warn!(event = %envelope.event, "send failed: {message}");
            self.state.write().mark_error(message.clone());
            self.forward(ServerEvent::ConnectionError(message));
            return None;
        }
        socket
    }

    fn handle_frame(&self, text: &str) {
        let envelope: Envelope = match serde_json::from_str(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("unparseable frame from backend: {e}");
                return;
            }
        };
        if let Some(event) = ServerEvent::from_envelope(&envelope) {
            self.forward(event);
        }
    }

    fn forward(&self, event: ServerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

async fn next_frame(
    socket: &mut Option<WsStream>,
) -> Option<Result<WsMessage, tokio_tungstenite::tungstenite::Error>> {
    match socket.as_mut() {
        Some(open) => open.next().await,
        None => std::future::pending().await,
    }
}
