use crate::core::preset::Preset;
use crate::core::preset_registry::PresetRegistry;
use crate::core::servo::Servo;
use crate::core::servo_registry::ServoRegistry;
use crate::core::{ActuatorSink, BlobStore};
use crate::domain::model::{
    BatchOutcome, PresetTargets, PresetsDump, ServoSpec, ServoUpdate, ServosDump,
};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Blob keys used for the two persisted documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub servos: String,
    pub presets: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            servos: "servos.json".to_string(),
            presets: "presets.json".to_string(),
        }
    }
}

/// Both registries plus the store they are persisted to.
///
/// Every mutating operation persists the whole state once it has succeeded.
pub struct State {
    servos: ServoRegistry,
    presets: PresetRegistry,
    store: Arc<dyn BlobStore>,
    keys: StorageKeys,
}

impl State {
    /// Loads both blobs. Missing or malformed blobs start empty; a preset that
    /// references an unknown servo is an error. Stale preset targets are left for apply to reject.
    pub fn load(
        store: Arc<dyn BlobStore>,
        sink: Arc<dyn ActuatorSink>,
        keys: StorageKeys,
    ) -> Result<Self> {
        let mut servos = ServoRegistry::new(sink);
        let mut presets = PresetRegistry::new();

        if let Some(dump) = read_blob::<ServosDump>(store.as_ref(), &keys.servos) {
            let loaded = servos.populate(dump);
            tracing::info!(count = loaded, key = %keys.servos, "Loaded servos");
        }

        if let Some(data) = read_blob::<PresetsDump>(store.as_ref(), &keys.presets) {
            let loaded = presets.populate(data, &servos)?;
            tracing::info!(count = loaded, key = %keys.presets, "Loaded presets");
        }

        Ok(Self {
            servos,
            presets,
            store,
            keys,
        })
    }

    pub fn servos(&self) -> &ServoRegistry {
        &self.servos
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Writes both registries back to the store.
    pub fn dump(&self) -> Result<()> {
        let servos = serde_json::to_vec(&self.servos.dump())?;
        self.store.save(&self.keys.servos, &servos)?;

        let presets = serde_json::to_vec(&self.presets.dump())?;
        self.store.save(&self.keys.presets, &presets)?;

        tracing::debug!(
            servos = self.servos.len(),
            presets = self.presets.len(),
            "State persisted"
        );
        Ok(())
    }

    pub fn put_servo(&mut self, name: &str, spec: ServoSpec) -> Result<&Servo> {
        self.servos.insert(name, spec)?;
        self.dump()?;
        tracing::info!(servo = %name, "Servo stored");
        self.servos.get(name)
    }

    pub fn update_servo(&mut self, name: &str, update: &ServoUpdate) -> Result<&Servo> {
        self.servos.update(name, update)?;
        self.dump()?;
        tracing::info!(servo = %name, ?update, "Servo updated");
        self.servos.get(name)
    }

    pub fn delete_servo(&mut self, name: &str) -> Result<()> {
        self.servos.delete(name)?;
        self.dump()?;
        tracing::info!(servo = %name, "Servo deleted");
        Ok(())
    }

    pub fn move_absolute(&mut self, name: &str, target: i32) -> Result<&Servo> {
        if let Err(e) = self.servos.move_absolute(name, target) {
            tracing::warn!(servo = %name, desired = target, "Absolute move rejected: {}", e);
            return Err(e);
        }
        self.dump()?;
        self.servos.get(name)
    }

    pub fn move_relative(&mut self, name: &str, delta: i32) -> Result<&Servo> {
        self.servos.move_relative(name, delta)?;
        self.dump()?;
        self.servos.get(name)
    }

    /// Batch absolute move; persists only when something actually moved.
    pub fn move_batch(&mut self, targets: &BTreeMap<String, i32>) -> Result<BatchOutcome> {
        let outcome = self.servos.move_batch(targets);
        if outcome.moved_any() {
            self.dump()?;
        }
        Ok(outcome)
    }

    /// Validates every target, then creates or replaces the preset. Returns whether it was new.
    pub fn put_preset(&mut self, name: &str, targets: &PresetTargets) -> Result<(&Preset, bool)> {
        let preset = Preset::from_targets(name, targets, &self.servos)?;
        let (_, created) = self.presets.insert(name, preset);
        self.dump()?;
        tracing::info!(preset = %name, members = targets.len(), created, "Preset stored");
        Ok((self.presets.get(name)?, created))
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        if let Err(e) = self.presets.apply(name, &mut self.servos) {
            tracing::warn!(preset = %name, "Preset not applied: {}", e);
            return Err(e);
        }
        self.dump()?;
        tracing::info!(preset = %name, "Preset applied");
        Ok(())
    }

    pub fn delete_preset(&mut self, name: &str) -> Result<()> {
        self.presets.delete(name)?;
        self.dump()?;
        tracing::info!(preset = %name, "Preset deleted");
        Ok(())
    }
}

fn read_blob<T: DeserializeOwned>(store: &dyn BlobStore, key: &str) -> Option<T> {
    let data = match store.load(key) {
        Ok(Some(data)) => data,
        Ok(None) => {
            tracing::info!(key, "No persisted data, starting empty");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, "Could not read persisted data, starting empty: {}", e);
            return None;
        }
    };

    match serde_json::from_slice(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, "Malformed persisted data, starting empty: {}", e);
            None
        }
    }
}
