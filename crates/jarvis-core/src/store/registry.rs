use std::collections::HashMap;

use crate::models::AiModel;

/// Mirror of the backend's available-model registry
/// (`ai_models_status` pushes). Replaced wholesale, never merged.
pub struct ModelRegistryStore {
    pub models: HashMap<String, AiModel>,
}

impl ModelRegistryStore {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    pub fn handle_models(&mut self, models: HashMap<String, AiModel>) {
        self.models = models;
    }

    pub fn total(&self) -> usize {
        self.models.len()
    }

    pub fn available(&self) -> usize {
        self.models.values().filter(|m| m.available).count()
    }
}

impl Default for ModelRegistryStore {
    fn default() -> Self {
        Self::new()
    }
}
