use std::collections::HashMap;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::constants::events;
use crate::models::SettingValue;
use crate::socket::SocketHandle;

/// Local mirror of the backend-owned control settings map. Toggles
/// take effect in the UI immediately but reach the backend only on an
/// explicit `save()`, which always sends the whole map - there is no
/// field-level diffing.
pub struct ControlSettingsStore {
    pub settings: HashMap<String, SettingValue>,
    /// True once a `control_settings` reply has populated the map
    pub loaded: bool,
}

impl ControlSettingsStore {
    pub fn new() -> Self {
        Self {
            settings: HashMap::new(),
            loaded: false,
        }
    }

    /// Ask the backend for the authoritative map. A no-op beyond a log
    /// line while disconnected; the component layer reflects the
    /// connection state itself.
    pub fn request(&self, handle: &SocketHandle) {
        if let Err(e) = handle.send(events::GET_CONTROL_SETTINGS, json!({})) {
            warn!("settings request skipped: {e}");
        }
    }

    /// Backend reply fully replaces the local map.
    pub fn handle_settings(&mut self, settings: HashMap<String, SettingValue>) {
        self.settings = settings;
        self.loaded = true;
    }

    /// Flip a boolean setting locally. No-op for numeric or missing
    /// keys.
    pub fn toggle(&mut self, key: &str) {
        match self.settings.get_mut(key) {
            Some(SettingValue::Bool(value)) => *value = !*value,
            Some(SettingValue::Number(_)) => debug!(key, "toggle ignored: not a boolean"),
            None => debug!(key, "toggle ignored: unknown setting"),
        }
    }

    /// Set a setting locally, adding the key if it is new.
    pub fn set_value(&mut self, key: impl Into<String>, value: SettingValue) {
        self.settings.insert(key.into(), value);
    }

    /// Send the entire current map. Local state is not rolled back on
    /// failure and the acknowledgment is not awaited.
    pub fn save(&self, handle: &SocketHandle) {
        let payload = json!({ "settings": &self.settings });
        if let Err(e) = handle.send(events::UPDATE_CONTROL_SETTINGS, payload) {
            warn!("settings save skipped: {e}");
        }
    }

    /// Save acknowledgment is logged and otherwise ignored.
    pub fn handle_save_ack(&self, success: bool) {
        if success {
            info!("control settings saved");
        } else {
            warn!("backend rejected the control settings update");
        }
    }
}

impl Default for ControlSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::settings_from_value;
    use crate::socket::{ConnectionStatus, SocketCommand};

    fn loaded_store() -> ControlSettingsStore {
        let mut store = ControlSettingsStore::new();
        store.handle_settings(settings_from_value(&json!({
            "voiceControl": true,
            "privacyMode": false,
            "responseSpeed": 0.7,
        })));
        store
    }

    #[test]
    fn reply_replaces_the_whole_map() {
        let mut store = loaded_store();
        assert!(store.loaded);

        store.handle_settings(settings_from_value(&json!({"webSearch": true})));

        assert_eq!(store.settings.len(), 1);
        assert_eq!(store.settings["webSearch"], SettingValue::Bool(true));
    }

    #[test]
    fn toggle_flips_booleans_only() {
        let mut store = loaded_store();

        store.toggle("voiceControl");
        assert_eq!(store.settings["voiceControl"], SettingValue::Bool(false));

        store.toggle("responseSpeed");
        assert_eq!(store.settings["responseSpeed"], SettingValue::Number(0.7));

        store.toggle("doesNotExist");
        assert_eq!(store.settings.len(), 3);
    }

    #[test]
    fn save_sends_the_entire_map() {
        let (handle, mut rx) = SocketHandle::test_pair(ConnectionStatus::Connected);
        let mut store = loaded_store();
        store.toggle("privacyMode");

        store.save(&handle);

        match rx.try_recv().unwrap() {
            SocketCommand::Emit(envelope) => {
                assert_eq!(envelope.event, "update_control_settings");
                let sent = &envelope.data["settings"];
                assert_eq!(sent["privacyMode"], json!(true));
                assert_eq!(sent["voiceControl"], json!(true));
                assert_eq!(sent["responseSpeed"], json!(0.7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn save_while_disconnected_keeps_local_edits_and_sends_nothing() {
        let (handle, mut rx) = SocketHandle::test_pair(ConnectionStatus::Disconnected);
        let mut store = loaded_store();
        store.toggle("privacyMode");

        store.save(&handle);

        assert!(rx.try_recv().is_err(), "no send while disconnected");
        assert_eq!(
            store.settings["privacyMode"],
            SettingValue::Bool(true),
            "pre-save toggles survive"
        );
    }

    #[test]
    fn request_while_disconnected_is_a_no_op() {
        let (handle, mut rx) = SocketHandle::test_pair(ConnectionStatus::Disconnected);
        let store = ControlSettingsStore::new();

        store.request(&handle);

        assert!(rx.try_recv().is_err());
        assert!(!store.loaded);
    }
}
