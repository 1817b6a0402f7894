pub mod engine;
pub mod message;
pub mod registry;
pub mod settings;
pub mod system;

pub use engine::{EngineState, EngineStatus};
pub use message::{ChatResponse, Message, Role};
pub use registry::AiModel;
pub use settings::SettingValue;
pub use system::{OverallHealth, SystemStatusUpdate};
