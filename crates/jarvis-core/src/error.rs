use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A send was attempted while the socket is not connected.
    /// Callers check connection state first and surface their own
    /// user-visible notice; nothing is queued.
    #[error("not connected to backend")]
    NotConnected,

    #[error("socket worker is gone")]
    WorkerGone,

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
