pub mod connection;
pub mod worker;

pub use connection::{
    ConnectionState, ConnectionStatus, SharedConnectionState, SocketCommand, SocketConnection,
    SocketHandle,
};
pub use worker::SocketWorker;
