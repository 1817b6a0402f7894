//! Client-side state synchronization core for the Jarvis assistant
//! backend: one persistent event channel, a set of single-owner stores
//! reconciling pushes and polls into a render-ready model, and a
//! poller that bounds staleness when pushes are dropped.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod http;
pub mod models;
pub mod poller;
pub mod runtime;
pub mod socket;
pub mod store;
pub mod tracing_setup;

pub use config::{CoreConfig, UserProfile};
pub use error::CoreError;
pub use events::{Envelope, ServerEvent};
pub use runtime::ClientRuntime;
pub use socket::{ConnectionState, ConnectionStatus, SocketConnection, SocketHandle};
