pub mod conversation;
pub mod registry;
pub mod settings;
pub mod system_status;

pub use conversation::ConversationStore;
pub use registry::ModelRegistryStore;
pub use settings::ControlSettingsStore;
pub use system_status::SystemStatusStore;
